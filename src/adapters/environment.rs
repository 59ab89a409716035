use std::collections::BTreeMap;

use crate::ports::EnvSource;

/// Environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed in-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticEnv {
    vars: BTreeMap<String, String>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// A base environment with fallback values for keys the base leaves unset or empty.
#[derive(Debug, Clone)]
pub struct LayeredEnv<B: EnvSource> {
    base: B,
    defaults: StaticEnv,
}

impl<B: EnvSource> LayeredEnv<B> {
    pub fn new(base: B) -> Self {
        Self { base, defaults: StaticEnv::new() }
    }

    pub fn set_defaults(&mut self, defaults: StaticEnv) {
        self.defaults = defaults;
    }
}

impl<B: EnvSource> EnvSource for LayeredEnv<B> {
    fn var(&self, key: &str) -> Option<String> {
        match self.base.var(key) {
            Some(value) if !value.is_empty() => Some(value),
            inherited => self.defaults.var(key).or(inherited),
        }
    }
}
