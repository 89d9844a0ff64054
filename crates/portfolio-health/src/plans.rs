//! Subscription tiers and the limits each one grants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Limits above this are presented as unlimited.
const UNLIMITED_ASSET_DISPLAY: u32 = 1000;
const NEAR_LIMIT_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlanTier {
    #[default]
    Free,
    Growth,
    Pro,
    ProMax,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanLimits {
    pub name: &'static str,
    pub monthly_price_usd: u32,
    pub max_assets: u32,
    pub max_tenants: u32,
    pub ai_access: bool,
    pub features: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetUsage {
    Unlimited,
    Metered {
        used: usize,
        limit: u32,
        near_limit: bool,
        can_add: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("{plan} plan allows {limit} asset(s) but the portfolio has {requested}")]
    AssetLimitExceeded {
        plan: &'static str,
        limit: u32,
        requested: usize,
    },
}

impl PlanTier {
    pub const fn ordered() -> [Self; 4] {
        [Self::Free, Self::Growth, Self::Pro, Self::ProMax]
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Growth => "GROWTH",
            Self::Pro => "PRO",
            Self::ProMax => "PRO_MAX",
        }
    }

    /// Unknown tiers fall back to the free plan.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().replace([' ', '-'], "_").to_ascii_uppercase();
        Self::ordered()
            .into_iter()
            .find(|tier| tier.token() == normalized)
            .unwrap_or_default()
    }

    pub const fn limits(self) -> PlanLimits {
        match self {
            Self::Free => PlanLimits {
                name: "Starter",
                monthly_price_usd: 0,
                max_assets: 1,
                max_tenants: 10,
                ai_access: false,
                features: &[
                    "1 Property",
                    "10 Tenants",
                    "Basic Reporting",
                    "Community Support",
                ],
            },
            Self::Growth => PlanLimits {
                name: "Growth",
                monthly_price_usd: 19,
                max_assets: 10,
                max_tenants: 50,
                ai_access: true,
                features: &[
                    "10 Properties",
                    "50 Tenants",
                    "Service SOW Generator",
                    "Operations Audit",
                    "Priority Support",
                ],
            },
            Self::Pro => PlanLimits {
                name: "Pro",
                monthly_price_usd: 49,
                max_assets: 9999,
                max_tenants: 9999,
                ai_access: true,
                features: &[
                    "Unlimited Properties",
                    "Unlimited Tenants",
                    "Work Order Management",
                    "Operations Ledger",
                ],
            },
            Self::ProMax => PlanLimits {
                name: "Pro Max",
                monthly_price_usd: 99,
                max_assets: 99999,
                max_tenants: 99999,
                ai_access: true,
                features: &[
                    "Everything in Pro",
                    "Investment Analysis",
                    "Underwriting Suite",
                    "Rehab Studio",
                ],
            },
        }
    }

    pub fn can_add_asset(self, current_assets: usize) -> bool {
        current_assets < self.limits().max_assets as usize
    }

    pub fn ensure_capacity(self, asset_count: usize) -> Result<(), PlanError> {
        let limits = self.limits();
        if asset_count > limits.max_assets as usize {
            return Err(PlanError::AssetLimitExceeded {
                plan: limits.name,
                limit: limits.max_assets,
                requested: asset_count,
            });
        }
        Ok(())
    }

    pub fn asset_usage(self, current_assets: usize) -> AssetUsage {
        let limit = self.limits().max_assets;
        if limit > UNLIMITED_ASSET_DISPLAY {
            return AssetUsage::Unlimited;
        }

        let ratio = current_assets as f64 / f64::from(limit);
        AssetUsage::Metered {
            used: current_assets,
            limit,
            near_limit: ratio >= NEAR_LIMIT_RATIO,
            can_add: self.can_add_asset(current_assets),
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl From<String> for PlanTier {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PlanTier> for String {
    fn from(value: PlanTier) -> Self {
        value.token().to_string()
    }
}
