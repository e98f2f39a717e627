/// Templates module for embedded text templates
/// This module provides access to embedded template files using include_str! macro
use std::collections::HashMap;

/// Get the default configuration document shown to users
pub fn get_config_template() -> &'static str {
    include_str!("../../templates/sqlcl-wrapper.config")
}

/// Get the header of the missing-configuration message
pub fn get_config_missing_template() -> &'static str {
    include_str!("../../templates/config_missing.txt")
}

/// Template replacement functionality
pub struct TemplateProcessor;

impl TemplateProcessor {
    /// Create a new template processor
    pub fn new() -> Self {
        Self
    }

    /// Replace every `{{name}}` placeholder with its value
    pub fn process(&self, template: &str, replacements: Option<&HashMap<String, String>>) -> String {
        let mut rendered = template.to_string();
        if let Some(replacements) = replacements {
            for (name, value) in replacements {
                rendered = rendered.replace(&format!("{{{{{}}}}}", name), value);
            }
        }
        rendered
    }

    /// Render the instructions printed when the configuration file is missing
    pub fn config_missing_message(&self, config_name: &str) -> String {
        let mut replacements = HashMap::new();
        replacements.insert("config_name".to_string(), config_name.to_string());

        let header = self.process(get_config_missing_template(), Some(&replacements));
        format!("{}{}", header, get_config_template())
    }
}

impl Default for TemplateProcessor {
    fn default() -> Self {
        Self::new()
    }
}
