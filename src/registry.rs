// Output plugin registry. The host's bootstrap calls `register` explicitly.

use crate::output::{Output, RedisOutput};
use std::collections::HashMap;

pub type OutputFactory = fn() -> Box<dyn Output>;

#[derive(Default)]
pub struct OutputRegistry {
    factories: HashMap<&'static str, OutputFactory>,
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named factory. A later add under the same name replaces the earlier one.
    pub fn add(&mut self, name: &'static str, factory: OutputFactory) {
        self.factories.insert(name, factory);
    }

    /// Fresh output instance for `name`, if registered.
    pub fn create(&self, name: &str) -> Option<Box<dyn Output>> {
        self.factories.get(name).map(|f| f())
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Register the `"redis"` output.
pub fn register(registry: &mut OutputRegistry) {
    registry.add("redis", || Box::new(RedisOutput::new()) as Box<dyn Output>);
}
