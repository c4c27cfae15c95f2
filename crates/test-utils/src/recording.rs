use sysconfig::config::SupervisorTarget;
use sysconfig::types::ParamValue;

/// Supervisor double that records every assignment in order.
#[derive(Debug, Default)]
pub struct RecordingSupervisor {
    pub assignments: Vec<(String, ParamValue)>,
}

impl RecordingSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.assignments.iter().map(|(f, _)| f.as_str()).collect()
    }

    pub fn value_of(&self, field: &str) -> Option<&ParamValue> {
        self.assignments
            .iter()
            .rev()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v)
    }
}

impl SupervisorTarget for RecordingSupervisor {
    fn assign(&mut self, field: &str, value: ParamValue) {
        self.assignments.push((field.to_string(), value));
    }
}
