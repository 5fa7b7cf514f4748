//! Replay Module
//!
//! Reads back the call history written by
//! [`RecordHistory`](crate::instrument::RecordHistory) and renders it as a
//! transcript.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::instrument::{inputs_key, outputs_key, Operation};
use crate::store::KeyValueStore;

// == Call Record ==
/// One recorded call: rendered input and rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    pub input: String,
    pub output: String,
}

// == Transcript ==
/// Recorded calls of one operation, in call order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub name: String,
    /// Number of recorded inputs
    pub calls: usize,
    pub records: Vec<CallRecord>,
}

impl Transcript {
    /// `"<name> was called <N> times"`.
    pub fn summary(&self) -> String {
        format!("{} was called {} times", self.name, self.calls)
    }

    /// One `"<name>(<input>) -> <output>"` line per call.
    pub fn lines(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|record| format!("{}({}) -> {}", self.name, record.input, record.output))
            .collect()
    }

    /// Number of transcript lines.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Summary line followed by the call lines, newline separated.
impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())?;
        for line in self.lines() {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

// == Replay ==
/// Builds the transcript of every recorded call of `name`.
///
/// The summary counts recorded inputs. If the input and output lists
/// differ in length (a call failed or is still in flight), the lines stop
/// at the shorter of the two.
pub async fn replay(store: &dyn KeyValueStore, name: &str) -> Result<Transcript> {
    let inputs = store.read_list_range(&inputs_key(name), 0, -1).await?;
    let outputs = store.read_list_range(&outputs_key(name), 0, -1).await?;
    let calls = inputs.len();

    let records = inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| CallRecord { input, output })
        .collect();

    Ok(Transcript {
        name: name.to_string(),
        calls,
        records,
    })
}

/// Replays the history of an instrumented operation, using its name.
pub async fn replay_operation<O: Operation>(
    store: &dyn KeyValueStore,
    operation: &O,
) -> Result<Transcript> {
    replay(store, operation.name()).await
}
