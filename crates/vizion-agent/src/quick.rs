// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned section instructions submitted like any typed request.

use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum QuickComponent {
    Header,
    Hero,
    Features,
    Footer,
}

impl QuickComponent {
    pub fn instruction(&self) -> &'static str {
        match self {
            QuickComponent::Header => "Add a modern header section to the top.",
            QuickComponent::Hero => "Add a bold hero section with a call to action.",
            QuickComponent::Features => "Add a features grid section.",
            QuickComponent::Footer => "Add a professional footer section.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_names() {
        assert_eq!("Hero".parse::<QuickComponent>().unwrap(), QuickComponent::Hero);
        assert_eq!(QuickComponent::Features.to_string(), "features");
        assert!("sidebar".parse::<QuickComponent>().is_err());
    }

    #[test]
    fn every_component_has_an_instruction() {
        for component in QuickComponent::iter() {
            assert!(component.instruction().starts_with("Add a"));
        }
    }
}
