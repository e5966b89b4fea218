// SPDX-License-Identifier: GPL-3.0-only

//! The named filters offered by the booth

use super::expression::FilterChain;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

/// Filter types for captured photos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// No filter applied
    #[default]
    None,
    /// Black & white
    Bnw,
    /// Sepia tone
    Sepia,
    /// Sepia with extra contrast, slightly darkened
    Vintage,
    /// Brighter, slightly saturated and softened
    Soft,
    /// High contrast dark black & white
    Noir,
    /// Strongly saturated and contrasted
    Vivid,
}

impl FilterType {
    /// All filters in display order
    pub const ALL: [FilterType; 7] = [
        FilterType::None,
        FilterType::Bnw,
        FilterType::Sepia,
        FilterType::Vintage,
        FilterType::Soft,
        FilterType::Noir,
        FilterType::Vivid,
    ];

    /// Catalog name shown on the filter chips
    pub fn name(&self) -> &'static str {
        match self {
            FilterType::None => "None",
            FilterType::Bnw => "BNW",
            FilterType::Sepia => "Sepia",
            FilterType::Vintage => "Vintage",
            FilterType::Soft => "Soft",
            FilterType::Noir => "Noir",
            FilterType::Vivid => "Vivid",
        }
    }

    /// Declarative filter expression
    pub fn expression(&self) -> &'static str {
        match self {
            FilterType::None => "none",
            FilterType::Bnw => "grayscale(100%)",
            FilterType::Sepia => "sepia(100%)",
            FilterType::Vintage => "sepia(100%) contrast(1.25) brightness(0.9)",
            FilterType::Soft => "brightness(1.1) saturate(1.1) blur(1px)",
            FilterType::Noir => "grayscale(100%) contrast(1.25) brightness(0.75)",
            FilterType::Vivid => "saturate(2) contrast(1.5) brightness(1.1)",
        }
    }

    /// Look a filter up by catalog name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Read-only mapping from filter name to parsed chain, built once per process
pub struct FilterCatalog {
    chains: HashMap<FilterType, FilterChain>,
}

impl FilterCatalog {
    /// The shared catalog
    pub fn global() -> &'static FilterCatalog {
        static CATALOG: OnceLock<FilterCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| FilterCatalog {
            chains: FilterType::ALL
                .into_iter()
                .map(|f| (f, FilterChain::parse(f.expression())))
                .collect(),
        })
    }

    /// Chain for a filter name; unknown names resolve to the identity chain
    pub fn lookup(&self, name: &str) -> FilterChain {
        match FilterType::from_name(name) {
            Some(filter) => self.chain(filter).clone(),
            None => {
                debug!(name, "Unknown filter, using identity");
                FilterChain::identity()
            }
        }
    }

    /// Chain for a known filter
    pub fn chain(&self, filter: FilterType) -> &FilterChain {
        static IDENTITY: OnceLock<FilterChain> = OnceLock::new();
        self.chains
            .get(&filter)
            .unwrap_or_else(|| IDENTITY.get_or_init(FilterChain::identity))
    }

    /// Catalog names in display order
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        FilterType::ALL.into_iter().map(|f| f.name())
    }
}
