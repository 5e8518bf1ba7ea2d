//! Named-operation dispatch.
//!
//! [`Contract`] is what a transport talks to. Each call opens a fresh
//! [`TxContext`], runs one operation inside an `invocation` span, and commits
//! the staged writes when the operation succeeds.

use std::fmt;
use std::sync::Arc;

use ledgerbook_core::codec::to_payload;
use ledgerbook_core::{Bank, BankId, File, FileId, Result, Transaction, TxHash, User, UserId};
use ledgerbook_store::{TxContext, WorldState};
use uuid::Uuid;

use crate::bootstrap::init_ledger;
use crate::function::Function;
use crate::recorder::{record_transaction, RecordReceipt};
use crate::repository::Repository;
use crate::resolver::resolve_by_hash;

/// The record-keeping contract bound to a world state.
#[derive(Clone)]
pub struct Contract {
    state: Arc<dyn WorldState>,
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contract").finish_non_exhaustive()
    }
}

impl Contract {
    /// Bind the contract to `state`.
    #[must_use]
    pub fn new(state: Arc<dyn WorldState>) -> Self {
        Self { state }
    }

    /// The world state this contract reads and writes.
    #[must_use]
    pub fn state(&self) -> &Arc<dyn WorldState> {
        &self.state
    }

    // =========================================================================
    // Invocation boundary
    // =========================================================================

    /// Run `function` with string `args` and commit its writes.
    ///
    /// Returns the operation's payload: a JSON record or list, `true`/`false`
    /// for existence checks, or an empty payload for `InitLedger` and
    /// `DeleteUser`.
    ///
    /// # Errors
    ///
    /// - `LedgerError::UnknownFunction` / `LedgerError::ArgumentCount` before
    ///   anything is read.
    /// - Whatever the operation fails with; nothing is committed then.
    /// - `LedgerError::StoreUnavailable` if the commit is rejected.
    pub fn submit(&self, function: &str, args: &[String]) -> Result<Vec<u8>> {
        self.invoke(function, args, true)
    }

    /// Run `function` with string `args` and discard its writes.
    ///
    /// # Errors
    ///
    /// As [`Contract::submit`], minus commit failures.
    pub fn evaluate(&self, function: &str, args: &[String]) -> Result<Vec<u8>> {
        self.invoke(function, args, false)
    }

    fn invoke(&self, name: &str, args: &[String], commit: bool) -> Result<Vec<u8>> {
        let function: Function = name.parse()?;
        function.check_arity(args)?;
        self.run(function, commit, |ctx| dispatch(ctx, function, args))
    }

    fn run<T>(
        &self,
        function: Function,
        commit: bool,
        op: impl FnOnce(&TxContext<'_>) -> Result<T>,
    ) -> Result<T> {
        let span = tracing::info_span!(
            "invocation",
            function = function.name(),
            query = function.is_query(),
            tx_id = %Uuid::new_v4()
        );
        let _guard = span.enter();

        let ctx = TxContext::new(self.state.as_ref());
        let output = op(&ctx).map_err(|e| {
            tracing::debug!(error = %e, "Invocation failed");
            e
        })?;

        // Queries stage nothing, so there is nothing to validate or write.
        if commit && !function.is_query() {
            let written = ctx.commit()?;
            tracing::debug!(written, "Invocation committed");
        }
        Ok(output)
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    /// Seed the fixed banks that are not yet present. Returns how many were written.
    ///
    /// # Errors
    ///
    /// Returns an error if a bank cannot be read or written.
    pub fn init_ledger(&self) -> Result<usize> {
        self.run(Function::InitLedger, true, init_ledger)
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Whether a user exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the world state cannot be read.
    pub fn user_exists(&self, id: &UserId) -> Result<bool> {
        self.run(Function::UserExists, false, |ctx| {
            Repository::<User>::new(ctx).exists(id)
        })
    }

    /// Create a user with no transactions.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AlreadyExists` if the id is taken.
    pub fn create_user(&self, id: UserId, name: &str, email: &str) -> Result<User> {
        self.run(Function::CreateUser, true, |ctx| {
            Repository::<User>::new(ctx).create(id, name, email)
        })
    }

    /// Read a user.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the user does not exist.
    pub fn get_user(&self, id: &UserId) -> Result<User> {
        self.run(Function::GetUser, false, |ctx| Repository::<User>::new(ctx).get(id))
    }

    /// Replace a user's name and email, keeping their transactions.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the user does not exist.
    pub fn update_user(&self, id: &UserId, name: &str, email: &str) -> Result<User> {
        self.run(Function::UpdateUser, true, |ctx| {
            Repository::<User>::new(ctx).update(id, name, email)
        })
    }

    /// Delete a user and the hash-index entries that point at it.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the user does not exist.
    pub fn delete_user(&self, id: &UserId) -> Result<()> {
        self.run(Function::DeleteUser, true, |ctx| {
            Repository::<User>::new(ctx).delete(id).map(drop)
        })
    }

    /// Every user, in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails or a user does not decode.
    pub fn get_all_users(&self) -> Result<Vec<User>> {
        self.run(Function::GetAllUsers, false, |ctx| {
            Repository::<User>::new(ctx).list_all()
        })
    }

    // =========================================================================
    // Banks
    // =========================================================================

    /// Whether a bank exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the world state cannot be read.
    pub fn bank_exists(&self, id: &BankId) -> Result<bool> {
        self.run(Function::BankExists, false, |ctx| {
            Repository::<Bank>::new(ctx).exists(id)
        })
    }

    /// Create a bank with a zero transaction count.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AlreadyExists` if the id is taken.
    pub fn create_bank(&self, id: BankId, name: &str) -> Result<Bank> {
        self.run(Function::CreateBank, true, |ctx| {
            Repository::<Bank>::new(ctx).create(id, name)
        })
    }

    /// Read a bank.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the bank does not exist.
    pub fn get_bank(&self, id: &BankId) -> Result<Bank> {
        self.run(Function::GetBankById, false, |ctx| Repository::<Bank>::new(ctx).get(id))
    }

    /// Every bank, in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails or a bank does not decode.
    pub fn get_all_banks(&self) -> Result<Vec<Bank>> {
        self.run(Function::GetAllBanks, false, |ctx| {
            Repository::<Bank>::new(ctx).list_all()
        })
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Record `transaction` for `user_id` against `bank_id`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the user does not exist.
    pub fn create_transaction(
        &self,
        user_id: &UserId,
        transaction: Transaction,
        bank_id: &BankId,
    ) -> Result<RecordReceipt> {
        self.run(Function::CreateTransaction, true, |ctx| {
            record_transaction(ctx, user_id, transaction, bank_id)
        })
    }

    /// The user owning the transaction with `hash`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the hash is not indexed or its user
    /// is gone.
    pub fn get_user_by_transaction_hash(&self, hash: &TxHash) -> Result<User> {
        self.run(Function::GetUserByTransactionHash, false, |ctx| {
            resolve_by_hash(ctx, hash)
        })
    }

    // =========================================================================
    // Files
    // =========================================================================

    /// Whether a file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the world state cannot be read.
    pub fn file_exists(&self, id: &FileId) -> Result<bool> {
        self.run(Function::FileExists, false, |ctx| {
            Repository::<File>::new(ctx).exists(id)
        })
    }

    /// Register a file.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AlreadyExists` if the id is taken.
    pub fn create_file(&self, id: FileId, file_name: &str, hash: &str, time: &str) -> Result<File> {
        self.run(Function::CreateFile, true, |ctx| {
            Repository::<File>::new(ctx).create(id, file_name, hash, time)
        })
    }

    /// Read a file.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the file does not exist.
    pub fn get_file(&self, id: &FileId) -> Result<File> {
        self.run(Function::GetFile, false, |ctx| Repository::<File>::new(ctx).get(id))
    }

    /// Every file, in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails or a file does not decode.
    pub fn get_all_files(&self) -> Result<Vec<File>> {
        self.run(Function::GetAllFiles, false, |ctx| {
            Repository::<File>::new(ctx).list_all()
        })
    }
}

/// Run one operation inside `ctx` and encode its payload.
fn dispatch(ctx: &TxContext<'_>, function: Function, args: &[String]) -> Result<Vec<u8>> {
    let users = Repository::<User>::new(ctx);
    let banks = Repository::<Bank>::new(ctx);
    let files = Repository::<File>::new(ctx);

    match (function, args) {
        (Function::InitLedger, []) => init_ledger(ctx).map(|_| Vec::new()),

        (Function::UserExists, [id]) => to_payload(&users.exists(&UserId::new(id.as_str())?)?),
        (Function::CreateUser, [id, name, email]) => {
            to_payload(&users.create(UserId::new(id.as_str())?, name, email)?)
        }
        (Function::GetUser, [id]) => to_payload(&users.get(&UserId::new(id.as_str())?)?),
        (Function::UpdateUser, [id, name, email]) => {
            to_payload(&users.update(&UserId::new(id.as_str())?, name, email)?)
        }
        (Function::DeleteUser, [id]) => users
            .delete(&UserId::new(id.as_str())?)
            .map(|_| Vec::new()),
        (Function::GetAllUsers, []) => to_payload(&users.list_all()?),

        (Function::BankExists, [id]) => to_payload(&banks.exists(&BankId::new(id.as_str())?)?),
        (Function::CreateBank, [id, name]) => {
            to_payload(&banks.create(BankId::new(id.as_str())?, name)?)
        }
        (Function::GetBankById, [id]) => to_payload(&banks.get(&BankId::new(id.as_str())?)?),
        (Function::GetAllBanks, []) => to_payload(&banks.list_all()?),

        (Function::CreateTransaction, [user_id, hash, amount, currency, date, bank_id]) => {
            let transaction = Transaction {
                hash: TxHash::new(hash.as_str())?,
                amount: amount.clone(),
                currency: currency.clone(),
                date: date.clone(),
            };
            let receipt = record_transaction(
                ctx,
                &UserId::new(user_id.as_str())?,
                transaction,
                &BankId::new(bank_id.as_str())?,
            )?;
            to_payload(&receipt)
        }
        (Function::GetUserByTransactionHash, [hash]) => {
            to_payload(&resolve_by_hash(ctx, &TxHash::new(hash.as_str())?)?)
        }

        (Function::FileExists, [id]) => to_payload(&files.exists(&FileId::new(id.as_str())?)?),
        (Function::CreateFile, [id, file_name, hash, time]) => {
            to_payload(&files.create(FileId::new(id.as_str())?, file_name, hash, time)?)
        }
        (Function::GetFile, [id]) => to_payload(&files.get(&FileId::new(id.as_str())?)?),
        (Function::GetAllFiles, []) => to_payload(&files.list_all()?),

        (function, args) => Err(function.arity_mismatch(args.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerbook_core::{Entity, LedgerError, SEED_BANKS};
    use ledgerbook_store::{MemoryWorldState, RocksWorldState};
    use tempfile::TempDir;

    fn contract() -> Contract {
        Contract::new(Arc::new(MemoryWorldState::new()))
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn user_id(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn bank_id(id: &str) -> BankId {
        BankId::new(id).unwrap()
    }

    fn tx(hash: &str) -> Transaction {
        Transaction {
            hash: TxHash::new(hash).unwrap(),
            amount: "200".into(),
            currency: "USD".into(),
            date: "2022-04-14".into(),
        }
    }

    fn with_john_and_cathay(contract: &Contract) {
        contract
            .create_user(user_id("1"), "John Lee", "john.lee@g.com")
            .unwrap();
        contract.create_bank(bank_id("04231910"), "Cathay").unwrap();
    }

    #[test]
    fn create_then_exists_then_duplicate() {
        let contract = contract();
        with_john_and_cathay(&contract);

        assert!(contract.user_exists(&user_id("1")).unwrap());
        let err = contract
            .create_user(user_id("1"), "Someone", "else@g.com")
            .unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyExists { entity: Entity::User, .. }));

        assert!(contract.bank_exists(&bank_id("04231910")).unwrap());
        assert!(contract.create_bank(bank_id("04231910"), "Other").is_err());
    }

    #[test]
    fn get_returns_supplied_fields() {
        let contract = contract();
        with_john_and_cathay(&contract);

        let user = contract.get_user(&user_id("1")).unwrap();
        assert_eq!(user, User::new(user_id("1"), "John Lee", "john.lee@g.com"));

        let bank = contract.get_bank(&bank_id("04231910")).unwrap();
        assert_eq!(bank, Bank::new(bank_id("04231910"), "Cathay"));
    }

    #[test]
    fn never_created_ids_are_not_found() {
        let contract = contract();

        assert!(contract.get_user(&user_id("7")).unwrap_err().is_not_found());
        assert!(contract.delete_user(&user_id("7")).unwrap_err().is_not_found());
        assert!(contract.get_bank(&bank_id("7")).unwrap_err().is_not_found());
    }

    #[test]
    fn record_and_resolve() {
        let contract = contract();
        with_john_and_cathay(&contract);

        let receipt = contract
            .create_transaction(&user_id("1"), tx("0x1"), &bank_id("04231910"))
            .unwrap();
        assert_eq!(receipt.bank_transaction_count, Some(1));

        let bank = contract.get_bank(&bank_id("04231910")).unwrap();
        assert_eq!(bank.transaction_count, 1);

        let owner = contract
            .get_user_by_transaction_hash(&TxHash::new("0x1").unwrap())
            .unwrap();
        assert_eq!(owner.id, user_id("1"));
        assert_eq!(owner.transactions, vec![tx("0x1")]);
    }

    #[test]
    fn deleted_user_no_longer_resolves() {
        let contract = contract();
        with_john_and_cathay(&contract);
        contract
            .create_transaction(&user_id("1"), tx("0x1"), &bank_id("04231910"))
            .unwrap();

        contract.delete_user(&user_id("1")).unwrap();

        assert!(!contract.user_exists(&user_id("1")).unwrap());
        let err = contract
            .get_user_by_transaction_hash(&TxHash::new("0x1").unwrap())
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(contract.state().get("TxHash_0x1").unwrap().is_none());
    }

    #[test]
    fn debug_hides_world_state() {
        assert_eq!(format!("{:?}", contract()), "Contract { .. }");
    }

    #[test]
    fn delete_keeps_index_entries_owned_by_others() {
        let contract = contract();
        with_john_and_cathay(&contract);
        contract
            .create_user(user_id("2"), "Mary Wu", "mary.wu@g.com")
            .unwrap();
        contract
            .create_transaction(&user_id("1"), tx("0x1"), &bank_id("04231910"))
            .unwrap();
        // The same hash recorded again re-points the index at user 2.
        contract
            .create_transaction(&user_id("2"), tx("0x1"), &bank_id("04231910"))
            .unwrap();

        contract.delete_user(&user_id("1")).unwrap();

        let owner = contract
            .get_user_by_transaction_hash(&TxHash::new("0x1").unwrap())
            .unwrap();
        assert_eq!(owner.id, user_id("2"));
        assert!(!contract.user_exists(&user_id("1")).unwrap());
    }

    #[test]
    fn unknown_user_leaves_bank_untouched() {
        let contract = contract();
        with_john_and_cathay(&contract);

        let err = contract
            .create_transaction(&user_id("2"), tx("0x1"), &bank_id("04231910"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { entity: Entity::User, .. }));

        let bank = contract.get_bank(&bank_id("04231910")).unwrap();
        assert_eq!(bank.transaction_count, 0);
        assert!(contract.state().get("TxHash_0x1").unwrap().is_none());
    }

    #[test]
    fn unknown_bank_is_not_counted() {
        let contract = contract();
        with_john_and_cathay(&contract);

        let receipt = contract
            .create_transaction(&user_id("1"), tx("0x1"), &bank_id("nope"))
            .unwrap();
        assert!(!receipt.bank_counted());
        assert!(!contract.bank_exists(&bank_id("nope")).unwrap());
        assert_eq!(contract.get_user(&user_id("1")).unwrap().transactions.len(), 1);
    }

    #[test]
    fn update_keeps_transactions() {
        let contract = contract();
        with_john_and_cathay(&contract);
        contract
            .create_transaction(&user_id("1"), tx("0x1"), &bank_id("04231910"))
            .unwrap();

        let user = contract
            .update_user(&user_id("1"), "John Q. Lee", "jql@g.com")
            .unwrap();
        assert_eq!(user.name, "John Q. Lee");
        assert_eq!(user.transactions, vec![tx("0x1")]);

        let err = contract.update_user(&user_id("9"), "x", "y").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn list_all_returns_each_record_once() {
        let contract = contract();
        for id in ["9", "10", "1", "b", "a"] {
            contract.create_user(user_id(id), "n", "e").unwrap();
        }
        // Ids that read like user keys must stay in their own families.
        contract.create_bank(bank_id("User"), "Lookalike").unwrap();
        contract
            .create_file(FileId::new("User_x").unwrap(), "a.pdf", "1234", "2022/04/11 12:00:09")
            .unwrap();

        let ids: Vec<_> = contract
            .get_all_users()
            .unwrap()
            .into_iter()
            .map(|u| u.id.to_string())
            .collect();
        assert_eq!(ids, vec!["1", "10", "9", "a", "b"]);

        let banks = contract.get_all_banks().unwrap();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].id, bank_id("User"));

        let files = contract.get_all_files().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].id.as_str(), "User_x");
    }

    #[test]
    fn init_ledger_is_idempotent() {
        let contract = contract();
        assert_eq!(contract.init_ledger().unwrap(), SEED_BANKS.len());
        assert_eq!(contract.init_ledger().unwrap(), 0);
        assert_eq!(contract.get_all_banks().unwrap().len(), SEED_BANKS.len());
    }

    #[test]
    fn files_round_trip() {
        let contract = contract();
        let id = FileId::new("1").unwrap();
        contract
            .create_file(id.clone(), "report.pdf", "1234", "2022/04/11 12:00:09")
            .unwrap();

        let file = contract.get_file(&id).unwrap();
        assert_eq!(file.file_name, "report.pdf");
        assert!(contract.file_exists(&id).unwrap());
        assert!(contract.get_file(&FileId::new("2").unwrap()).unwrap_err().is_not_found());
    }

    #[test]
    fn submit_dispatches_by_name() {
        let contract = contract();
        contract
            .submit("CreateUser", &args(&["1", "John Lee", "john.lee@g.com"]))
            .unwrap();
        contract
            .submit("CreateBank", &args(&["04231910", "Cathay"]))
            .unwrap();
        contract
            .submit(
                "CreateTransaction",
                &args(&["1", "0x1", "200", "USD", "2022-04-14", "04231910"]),
            )
            .unwrap();

        let payload = contract
            .evaluate("GetUserByTransactionHash", &args(&["0x1"]))
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["transactions"][0]["amount"], "200");

        let payload = contract.evaluate("GetBankByID", &args(&["04231910"])).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(json["transaction_count"], 1);

        assert_eq!(contract.evaluate("BankExists", &args(&["x"])).unwrap(), b"false");
        assert!(contract.submit("DeleteUser", &args(&["1"])).unwrap().is_empty());
    }

    #[test]
    fn evaluate_discards_writes() {
        let contract = contract();
        let payload = contract
            .evaluate("CreateUser", &args(&["1", "John Lee", "john.lee@g.com"]))
            .unwrap();
        assert!(!payload.is_empty());
        assert!(!contract.user_exists(&user_id("1")).unwrap());
    }

    #[test]
    fn boundary_errors() {
        let contract = contract();
        assert!(matches!(
            contract.submit("Transfer", &[]),
            Err(LedgerError::UnknownFunction(_))
        ));
        assert!(matches!(
            contract.submit("GetUser", &[]),
            Err(LedgerError::ArgumentCount { expected: 1, received: 0, .. })
        ));
        assert!(matches!(
            contract.submit("GetUser", &args(&[""])),
            Err(LedgerError::InvalidId(_))
        ));
    }

    #[test]
    fn rocks_backend_persists_across_contracts() {
        let dir = TempDir::new().unwrap();
        {
            let contract = Contract::new(Arc::new(RocksWorldState::open(dir.path()).unwrap()));
            with_john_and_cathay(&contract);
            contract
                .create_transaction(&user_id("1"), tx("0x1"), &bank_id("04231910"))
                .unwrap();
        }

        let contract = Contract::new(Arc::new(RocksWorldState::open(dir.path()).unwrap()));
        let owner = contract
            .get_user_by_transaction_hash(&TxHash::new("0x1").unwrap())
            .unwrap();
        assert_eq!(owner.name, "John Lee");
        assert_eq!(contract.get_bank(&bank_id("04231910")).unwrap().transaction_count, 1);
    }
}
