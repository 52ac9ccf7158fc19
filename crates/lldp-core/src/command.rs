//! Device commands
//!
//! The differs emit structured [`Command`]s. Rendering to the device's
//! native syntax happens once, at the boundary, through [`CommandSyntax`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::CommandSyntax;
use crate::model::Elin;

/// Whether a command creates or removes configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Set,
    Delete,
}

/// The configuration node a command addresses, below the interface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Directive {
    /// The `disable` overlay flag
    Disable,
    /// The whole location subtree
    Location,
    /// One coordinate attribute; deletes address the key and its value
    Coordinate { key: String, value: String },
    /// Civic address country code
    CountryCode(String),
    /// Civic address component; deletes carry no value
    CivicAddress {
        ca_type: u32,
        ca_value: Option<String>,
    },
    /// Emergency location identifier number
    Elin(Elin),
}

/// One imperative command against an interface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    pub action: Action,
    pub interface: String,
    pub directive: Directive,
}

impl Command {
    /// Create a set command
    pub fn set(interface: impl Into<String>, directive: Directive) -> Self {
        Self {
            action: Action::Set,
            interface: interface.into(),
            directive,
        }
    }

    /// Create a delete command
    pub fn delete(interface: impl Into<String>, directive: Directive) -> Self {
        Self {
            action: Action::Delete,
            interface: interface.into(),
            directive,
        }
    }

    /// Render the command in the given device syntax
    pub fn render(&self, syntax: &CommandSyntax) -> String {
        let prefix = match self.action {
            Action::Set => &syntax.set_prefix,
            Action::Delete => &syntax.delete_prefix,
        };

        let mut tokens = vec![prefix.clone(), self.interface.clone()];
        match &self.directive {
            Directive::Disable => tokens.push(syntax.disable.clone()),
            Directive::Location => tokens.push(syntax.location.clone()),
            Directive::Coordinate { key, value } => tokens.extend([
                syntax.location.clone(),
                syntax.coordinate_based.clone(),
                key.clone(),
                value.clone(),
            ]),
            Directive::CountryCode(code) => tokens.extend([
                syntax.location.clone(),
                syntax.civic_based.clone(),
                syntax.country_code.clone(),
                code.clone(),
            ]),
            Directive::CivicAddress { ca_type, ca_value } => {
                tokens.extend([
                    syntax.location.clone(),
                    syntax.civic_based.clone(),
                    syntax.ca_type.clone(),
                    ca_type.to_string(),
                ]);
                if let Some(value) = ca_value {
                    tokens.extend([syntax.ca_value.clone(), value.clone()]);
                }
            }
            Directive::Elin(elin) => tokens.extend([
                syntax.location.clone(),
                syntax.elin.clone(),
                elin.to_string(),
            ]),
        }

        tokens.join(" ")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&CommandSyntax::default()))
    }
}

/// Render a command list in the given device syntax
pub fn render_all(commands: &[Command], syntax: &CommandSyntax) -> Vec<String> {
    commands.iter().map(|c| c.render(syntax)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_vyos_syntax() {
        let elin = Elin::new(1).unwrap();
        assert_eq!(
            Command::set("eth0", Directive::Elin(elin)).to_string(),
            "set service lldp interface eth0 location elin 0000000001"
        );
        assert_eq!(
            Command::delete("eth0", Directive::Disable).to_string(),
            "delete service lldp interface eth0 disable"
        );
        assert_eq!(
            Command::delete(
                "eth1",
                Directive::Coordinate {
                    key: "latitude".to_string(),
                    value: "40.0".to_string()
                }
            )
            .to_string(),
            "delete service lldp interface eth1 location coordinate-based latitude 40.0"
        );
    }

    #[test]
    fn test_civic_delete_omits_value() {
        let cmd = Command::delete(
            "eth1",
            Directive::CivicAddress {
                ca_type: 6,
                ca_value: None,
            },
        );
        assert_eq!(
            cmd.to_string(),
            "delete service lldp interface eth1 location civic-based ca-type 6"
        );
    }

    #[test]
    fn test_render_with_custom_syntax() {
        let syntax = CommandSyntax {
            set_prefix: "set protocols lldp interface".to_string(),
            ..CommandSyntax::default()
        };
        let cmd = Command::set("ge-0/0/1", Directive::CountryCode("DE".to_string()));
        assert_eq!(
            cmd.render(&syntax),
            "set protocols lldp interface ge-0/0/1 location civic-based country-code DE"
        );
    }
}
