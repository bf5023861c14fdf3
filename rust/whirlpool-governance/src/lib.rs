// Whirlpool Governance - Fee-rate governance for whirlpool pools
// Principle: Only the config's fee authority moves fees, and only within bounds

pub mod cli;
pub mod governance;
pub mod storage;
pub mod types;

#[cfg(test)]
mod tests;
