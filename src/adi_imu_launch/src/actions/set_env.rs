//! Environment directives for the launch session

use serde::{Deserialize, Serialize};

/// Set environment variable directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDirective {
    pub variable_name: String,
    pub value: String,
}

/// Collects environment directives for one assembly.
///
/// Directives are process-wide and live for the whole orchestrated session.
/// There is no unset; a later `set` of the same name replaces the value in
/// place, so each name appears once in declaration order.
#[derive(Debug, Default)]
pub struct EnvironmentConfigurator {
    directives: Vec<EnvironmentDirective>,
}

impl EnvironmentConfigurator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, variable_name: impl Into<String>, value: impl Into<String>) {
        let variable_name = variable_name.into();
        let value = value.into();

        if let Some(existing) = self
            .directives
            .iter_mut()
            .find(|d| d.variable_name == variable_name)
        {
            log::debug!("Overwriting environment directive {}", variable_name);
            existing.value = value;
            return;
        }

        log::debug!("Environment directive {}={}", variable_name, value);
        self.directives.push(EnvironmentDirective {
            variable_name,
            value,
        });
    }

    pub fn get(&self, variable_name: &str) -> Option<&str> {
        self.directives
            .iter()
            .find(|d| d.variable_name == variable_name)
            .map(|d| d.value.as_str())
    }

    pub fn directives(&self) -> &[EnvironmentDirective] {
        &self.directives
    }

    pub fn into_directives(self) -> Vec<EnvironmentDirective> {
        self.directives
    }
}

/// Export directives into the current process environment.
///
/// The change is never rolled back: it lasts until the process exits.
pub fn apply_to_process(directives: &[EnvironmentDirective]) {
    for directive in directives {
        log::debug!(
            "Exporting {}={}",
            directive.variable_name,
            directive.value
        );
        std::env::set_var(&directive.variable_name, &directive.value);
    }
}
