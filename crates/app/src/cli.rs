use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::TransactionType;

#[derive(Parser, Debug)]
#[command(name = "spendbook")]
#[command(about = "Record income and expenses, keep a trash, push them to a sync endpoint")]
pub struct Cli {
    /// Optional settings file path (TOML).
    #[arg(long, env = "SPENDBOOK_CONFIG")]
    pub config: Option<String>,
    /// Override the database file (`:memory:` for a throwaway store).
    #[arg(long)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new transaction.
    Add(DraftArgs),
    /// List active transactions, or the trash with `--deleted`.
    List(ListArgs),
    /// Show one transaction, deleted or not.
    Show { id: i64 },
    /// Change title, amount or type of a transaction.
    Edit(EditArgs),
    /// Move a transaction to the trash.
    Delete { id: i64 },
    /// Bring a transaction back from the trash.
    Restore { id: i64 },
    /// Replace the remote collection with the active transactions.
    Sync(SyncArgs),
    /// Serve an in-memory sync collection for testing.
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct DraftArgs {
    #[arg(long)]
    pub title: String,
    /// Unsigned amount; the type decides the direction.
    #[arg(long)]
    pub amount: String,
    #[arg(long = "type", default_value = "expense")]
    pub kind: TransactionType,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long = "type")]
    pub kind: Option<TransactionType>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum KindFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl KindFilter {
    pub fn kind(self) -> Option<TransactionType> {
        match self {
            Self::All => None,
            Self::Income => Some(TransactionType::Income),
            Self::Expense => Some(TransactionType::Expense),
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// List the trash instead of active transactions.
    #[arg(long)]
    pub deleted: bool,
    /// Case-insensitive title substring.
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long = "type", value_enum, default_value_t = KindFilter::All)]
    pub kind: KindFilter,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Collection URL; falls back to `sync.endpoint` from the settings.
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long)]
    pub bind: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_defaults_to_expense() {
        let cli = Cli::try_parse_from(["spendbook", "add", "--title", "Coffee", "--amount", "4.5"])
            .unwrap();
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.title, "Coffee");
        assert_eq!(args.amount, "4.5");
        assert_eq!(args.kind, TransactionType::Expense);
    }

    #[test]
    fn type_is_parsed_case_insensitively() {
        let cli = Cli::try_parse_from([
            "spendbook", "add", "--title", "Salary", "--amount", "1200", "--type", "Income",
        ])
        .unwrap();
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.kind, TransactionType::Income);

        assert!(
            Cli::try_parse_from([
                "spendbook", "add", "--title", "x", "--amount", "1", "--type", "refund",
            ])
            .is_err()
        );
    }

    #[test]
    fn list_filters() {
        let cli = Cli::try_parse_from([
            "spendbook", "--database", ":memory:", "list", "--deleted", "--title", "cof", "--type",
            "expense",
        ])
        .unwrap();
        assert_eq!(cli.database.as_deref(), Some(":memory:"));
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert!(args.deleted);
        assert_eq!(args.title, "cof");
        assert_eq!(args.kind.kind(), Some(TransactionType::Expense));
    }

    #[test]
    fn list_defaults_to_all_active() {
        let cli = Cli::try_parse_from(["spendbook", "list"]).unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert!(!args.deleted);
        assert_eq!(args.kind, KindFilter::All);
        assert_eq!(args.kind.kind(), None);
    }
}
