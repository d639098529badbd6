use crate::ports::RewardSink;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const STARTING_BALANCE: u64 = 900;
/// Ledger entries kept; older ones are dropped.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Credit,
    Debit,
    Reset,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: u64,
    pub reason: String,
    pub at: DateTime<Utc>,
    pub balance: u64,
}

/// Coin balance plus a ledger of the last `HISTORY_LIMIT` transactions.
#[derive(Clone, Debug, PartialEq)]
pub struct Wallet {
    balance: u64,
    history: VecDeque<Transaction>,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}

impl Wallet {
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.balance >= amount
    }

    pub fn add(&mut self, amount: u64, reason: &str) -> bool {
        if amount == 0 {
            return false;
        }
        self.balance = self.balance.saturating_add(amount);
        self.record(TransactionKind::Credit, amount, reason);
        info!("added {} coins ({}), balance {}", amount, reason, self.balance);
        true
    }

    pub fn spend(&mut self, amount: u64, reason: &str) -> bool {
        if amount == 0 || !self.can_afford(amount) {
            return false;
        }
        self.balance -= amount;
        self.record(TransactionKind::Debit, amount, reason);
        info!("spent {} coins ({}), balance {}", amount, reason, self.balance);
        true
    }

    pub fn reset_balance(&mut self, amount: u64) {
        self.balance = amount;
        self.record(TransactionKind::Reset, amount, "game reset");
    }

    /// Most recent first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &Transaction> {
        self.history.iter().rev().take(count)
    }

    fn record(&mut self, kind: TransactionKind, amount: u64, reason: &str) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(Transaction {
            kind,
            amount,
            reason: reason.to_string(),
            at: Utc::now(),
            balance: self.balance,
        });
    }
}

impl RewardSink for Wallet {
    fn credit(&mut self, amount: u64, reason: &str) {
        self.add(amount, reason);
    }

    fn reset(&mut self) {
        self.reset_balance(STARTING_BALANCE);
    }
}
