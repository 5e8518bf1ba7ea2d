//! The named operations a caller can invoke.

use std::fmt;
use std::str::FromStr;

use ledgerbook_core::{LedgerError, Result};

/// A contract operation, addressed by name at the invocation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// `InitLedger()`
    InitLedger,
    /// `UserExists(id)`
    UserExists,
    /// `CreateUser(id, name, email)`
    CreateUser,
    /// `GetUser(id)`
    GetUser,
    /// `UpdateUser(id, name, email)`
    UpdateUser,
    /// `DeleteUser(id)`
    DeleteUser,
    /// `GetAllUsers()`
    GetAllUsers,
    /// `BankExists(id)`
    BankExists,
    /// `CreateBank(id, name)`
    CreateBank,
    /// `GetBankByID(id)`
    GetBankById,
    /// `GetAllBanks()`
    GetAllBanks,
    /// `CreateTransaction(userId, hash, amount, currency, date, bankId)`
    CreateTransaction,
    /// `GetUserByTransactionHash(hash)`
    GetUserByTransactionHash,
    /// `FileExists(id)`
    FileExists,
    /// `CreateFile(id, fileName, hash, time)`
    CreateFile,
    /// `GetFile(id)`
    GetFile,
    /// `GetAllFiles()`
    GetAllFiles,
}

impl Function {
    /// Every operation, in the order they are documented.
    pub const ALL: [Self; 17] = [
        Self::InitLedger,
        Self::UserExists,
        Self::CreateUser,
        Self::GetUser,
        Self::UpdateUser,
        Self::DeleteUser,
        Self::GetAllUsers,
        Self::BankExists,
        Self::CreateBank,
        Self::GetBankById,
        Self::GetAllBanks,
        Self::CreateTransaction,
        Self::GetUserByTransactionHash,
        Self::FileExists,
        Self::CreateFile,
        Self::GetFile,
        Self::GetAllFiles,
    ];

    /// The wire name of the operation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InitLedger => "InitLedger",
            Self::UserExists => "UserExists",
            Self::CreateUser => "CreateUser",
            Self::GetUser => "GetUser",
            Self::UpdateUser => "UpdateUser",
            Self::DeleteUser => "DeleteUser",
            Self::GetAllUsers => "GetAllUsers",
            Self::BankExists => "BankExists",
            Self::CreateBank => "CreateBank",
            Self::GetBankById => "GetBankByID",
            Self::GetAllBanks => "GetAllBanks",
            Self::CreateTransaction => "CreateTransaction",
            Self::GetUserByTransactionHash => "GetUserByTransactionHash",
            Self::FileExists => "FileExists",
            Self::CreateFile => "CreateFile",
            Self::GetFile => "GetFile",
            Self::GetAllFiles => "GetAllFiles",
        }
    }

    /// Number of string arguments the operation takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::InitLedger | Self::GetAllUsers | Self::GetAllBanks | Self::GetAllFiles => 0,
            Self::UserExists
            | Self::GetUser
            | Self::DeleteUser
            | Self::BankExists
            | Self::GetBankById
            | Self::GetUserByTransactionHash
            | Self::FileExists
            | Self::GetFile => 1,
            Self::CreateBank => 2,
            Self::CreateUser | Self::UpdateUser => 3,
            Self::CreateFile => 4,
            Self::CreateTransaction => 6,
        }
    }

    /// Whether the operation only reads.
    #[must_use]
    pub const fn is_query(self) -> bool {
        matches!(
            self,
            Self::UserExists
                | Self::GetUser
                | Self::GetAllUsers
                | Self::BankExists
                | Self::GetBankById
                | Self::GetAllBanks
                | Self::GetUserByTransactionHash
                | Self::FileExists
                | Self::GetFile
                | Self::GetAllFiles
        )
    }

    /// Check that `args` has exactly [`Function::arity`] entries.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ArgumentCount` otherwise.
    pub fn check_arity(self, args: &[String]) -> Result<()> {
        if args.len() == self.arity() {
            Ok(())
        } else {
            Err(self.arity_mismatch(args.len()))
        }
    }

    pub(crate) fn arity_mismatch(self, received: usize) -> LedgerError {
        LedgerError::ArgumentCount {
            function: self.name(),
            expected: self.arity(),
            received,
        }
    }
}

impl FromStr for Function {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| LedgerError::UnknownFunction(s.to_string()))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for function in Function::ALL {
            assert_eq!(function.name().parse::<Function>().unwrap(), function);
        }
    }

    #[test]
    fn bank_lookup_keeps_upper_case_id() {
        assert_eq!("GetBankByID".parse::<Function>().unwrap(), Function::GetBankById);
        assert!("GetBankById".parse::<Function>().is_err());
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "TransferFunds".parse::<Function>().unwrap_err();
        assert!(matches!(err, LedgerError::UnknownFunction(ref name) if name == "TransferFunds"));
    }

    #[test]
    fn queries_are_read_only_operations() {
        let queries: Vec<_> = Function::ALL
            .into_iter()
            .filter(|function| function.is_query())
            .collect();
        assert_eq!(queries.len(), 10);
        assert!(queries.iter().all(|f| f.name().starts_with("Get") || f.name().ends_with("Exists")));

        for write in [
            Function::InitLedger,
            Function::CreateUser,
            Function::UpdateUser,
            Function::DeleteUser,
            Function::CreateBank,
            Function::CreateTransaction,
            Function::CreateFile,
        ] {
            assert!(!write.is_query(), "{write} writes");
        }
    }

    #[test]
    fn arity_is_enforced() {
        let args = vec!["1".to_string()];
        assert!(Function::GetUser.check_arity(&args).is_ok());

        let err = Function::CreateUser.check_arity(&args).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::ArgumentCount {
                function: "CreateUser",
                expected: 3,
                received: 1
            }
        ));
    }
}
