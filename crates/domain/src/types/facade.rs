//! API facades
//!
//! A facade is the provider's named permission scope. Access tokens are
//! issued per facade and every authenticated request is made under one.

use serde::{Deserialize, Serialize};

use crate::impl_wire_name_conversions;

/// Permission scope an access token is issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facade {
    Merchant,
    Payout,
    Pos,
}

impl_wire_name_conversions!(Facade {
    Merchant => "merchant",
    Payout => "payout",
    Pos => "pos",
});

impl Facade {
    /// All known facades, in declaration order.
    pub const ALL: [Self; 3] = [Self::Merchant, Self::Payout, Self::Pos];
}
