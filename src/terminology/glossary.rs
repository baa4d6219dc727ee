// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::IndexMap;
use serde::Serialize;

use super::Terminology;
use crate::ops::{Operation, OPTION_PROPERTIES};

/// Human-readable description of every exposed operation and option key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Glossary {
    pub methods: IndexMap<String, String>,
    pub properties: IndexMap<String, String>,
}

impl Glossary {
    pub(super) fn for_terminology(terminology: &Terminology) -> Self {
        let mut methods = IndexMap::new();
        for op in Operation::ALL {
            methods.insert(op.name().to_owned(), op.description().to_owned());
            for alias in op.builtin_aliases() {
                let description = format!("{} (alias for {op})", op.description());
                methods.insert((*alias).to_owned(), description);
            }
        }
        for (name, target) in &terminology.config().methods {
            methods.insert(name.clone(), format!("Alias for {target}"));
        }
        for name in terminology.custom_names() {
            methods.insert(name.to_owned(), "Custom operation".to_owned());
        }

        let mut properties = OPTION_PROPERTIES
            .iter()
            .map(|&(name, text)| (name.to_owned(), text.to_owned()))
            .collect::<IndexMap<_, _>>();
        for (public, internal) in &terminology.config().properties {
            properties.insert(public.clone(), format!("Alias for {internal}"));
        }

        Self { methods, properties }
    }
}
