//! Call history recording.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::instrument::Operation;
use crate::store::SharedStore;

/// List key holding the rendered inputs of `name`.
pub fn inputs_key(name: &str) -> String {
    format!("{}:inputs", name)
}

/// List key holding the rendered outputs of `name`.
pub fn outputs_key(name: &str) -> String {
    format!("{}:outputs", name)
}

// == Record History ==
/// Appends each call's input to `<name>:inputs` before delegating and its
/// output to `<name>:outputs` afterwards.
///
/// If the inner call fails the error is returned and no output is appended,
/// leaving the input list one entry longer than the output list.
pub struct RecordHistory<O> {
    inner: O,
    store: SharedStore,
}

impl<O: Operation> RecordHistory<O> {
    pub fn new(inner: O, store: SharedStore) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl<O: Operation> Operation for RecordHistory<O> {
    type Input = O::Input;
    type Output = O::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, input: O::Input) -> Result<O::Output> {
        let name = self.name();
        let rendered_input = input.to_string();
        self.store
            .append_to_list(&inputs_key(name), &rendered_input)
            .await?;

        let output = self.inner.call(input).await?;

        self.store
            .append_to_list(&outputs_key(name), &output.to_string())
            .await?;
        debug!("Recorded {}({}) -> {}", name, rendered_input, output);
        Ok(output)
    }
}
