//! Claim acknowledgment.
//!
//! Claiming turns the final coin count into a message for the player. There
//! is no settlement behind it.

use std::fmt;

/// Acknowledgment of a reward claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub amount: u32,
    pub address: Option<String>,
}

impl ClaimReceipt {
    pub fn new(amount: u32, address: Option<&str>) -> Self {
        Self {
            amount,
            address: address.map(str::to_string),
        }
    }
}

impl fmt::Display for ClaimReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if self.amount == 1 { "coin" } else { "coins" };
        match &self.address {
            Some(addr) => write!(
                f,
                "Reward claimed! Sending {} {} to {}...",
                self.amount, unit, addr
            ),
            None => write!(
                f,
                "Reward claimed! Sending {} {} to your wallet...",
                self.amount, unit
            ),
        }
    }
}
