//! Ledger initialization.

use ledgerbook_core::{Bank, BankId, Result, SEED_BANKS};
use ledgerbook_store::TxContext;

use crate::repository::Repository;

/// Write each seed bank that is not already present.
///
/// Existing banks, and their counters, are left as they are. Returns how many
/// banks were written.
///
/// # Errors
///
/// Returns an error if a bank cannot be read or written.
pub fn init_ledger(ctx: &TxContext<'_>) -> Result<usize> {
    let banks = Repository::<Bank>::new(ctx);
    let mut seeded = 0;

    for (id, name) in SEED_BANKS {
        let id = BankId::new(id)?;
        if banks.exists(&id)? {
            tracing::debug!(bank_id = %id, "Seed bank already present");
            continue;
        }
        banks.put(&Bank::new(id, name))?;
        seeded += 1;
    }

    tracing::info!(seeded, "Ledger initialized");
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerbook_store::MemoryWorldState;

    #[test]
    fn seeds_fixed_banks() {
        let state = MemoryWorldState::new();
        let ctx = TxContext::new(&state);
        assert_eq!(init_ledger(&ctx).unwrap(), SEED_BANKS.len());

        let banks = Repository::<Bank>::new(&ctx).list_all();
        // Scans see committed state only.
        assert!(banks.unwrap().is_empty());
        ctx.commit().unwrap();

        let ctx = TxContext::new(&state);
        let banks = Repository::<Bank>::new(&ctx).list_all().unwrap();
        assert_eq!(banks.len(), SEED_BANKS.len());
        assert!(banks.iter().all(|b| b.transaction_count == 0));
    }

    #[test]
    fn rerun_keeps_counters() {
        let state = MemoryWorldState::new();
        let ctx = TxContext::new(&state);
        init_ledger(&ctx).unwrap();
        let id = BankId::new(SEED_BANKS[0].0).unwrap();
        Repository::<Bank>::new(&ctx).count_transaction(&id).unwrap();
        ctx.commit().unwrap();

        let ctx = TxContext::new(&state);
        assert_eq!(init_ledger(&ctx).unwrap(), 0);
        ctx.commit().unwrap();

        let ctx = TxContext::new(&state);
        let bank = Repository::<Bank>::new(&ctx).get(&id).unwrap();
        assert_eq!(bank.transaction_count, 1);
    }
}
