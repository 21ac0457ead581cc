//! Wallet collaborator.
//!
//! The game only needs to know whether a wallet is connected (the board is
//! unreachable until it is) and which address to show in the header and the
//! claim acknowledgment. Nothing here moves value.

use std::env;

use crate::error::WalletError;

/// Identity provider the game gates on
pub trait Wallet {
    fn is_connected(&self) -> bool;

    /// Connected address, `None` while disconnected
    fn address(&self) -> Option<&str>;

    fn connect(&mut self) -> Result<(), WalletError>;
}

/// Wallet backed by a locally configured address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalWallet {
    account: Option<String>,
    connected: bool,
}

impl LocalWallet {
    pub fn new(account: Option<String>) -> Self {
        Self {
            account,
            connected: false,
        }
    }

    /// Account from `FRUIT_WHACK_WALLET`
    pub fn from_env() -> Self {
        let account = env::var("FRUIT_WHACK_WALLET")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Self::new(account)
    }
}

impl Wallet for LocalWallet {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn address(&self) -> Option<&str> {
        if self.connected {
            self.account.as_deref()
        } else {
            None
        }
    }

    fn connect(&mut self) -> Result<(), WalletError> {
        // The account string is used as-is.
        let account = self.account.as_deref().ok_or(WalletError::NoAccount)?;
        self.connected = true;
        tracing::info!(address = account, "wallet connected");
        Ok(())
    }
}
