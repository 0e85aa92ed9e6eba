//! Command handlers. Each one awaits its repository call before printing, so
//! a listing always reflects the write that preceded it.
use std::time::Duration;

use engine::{Repository, Summary, Transaction, TransactionDraft, TransactionFilter};
use sync::{SyncReport, Syncer};

use crate::{
    cli::{DraftArgs, EditArgs, ListArgs, ServeArgs, SyncArgs},
    error::{AppError, Result},
    settings::Settings,
};

pub async fn add(repository: &Repository, args: DraftArgs) -> Result<i64> {
    let draft = TransactionDraft::parse(&args.title, &args.amount, args.kind)?;
    let id = repository.create(&draft).await?;
    println!("added transaction {id}");
    Ok(id)
}

pub async fn list(repository: &Repository, args: ListArgs) -> Result<Vec<Transaction>> {
    let filter = TransactionFilter {
        title: args.title,
        kind: args.kind.kind(),
    };
    let txs = filter.apply(repository.transactions(args.deleted).await?);

    if txs.is_empty() {
        println!("{}", if args.deleted { "Trash is empty" } else { "No transactions" });
        return Ok(txs);
    }
    for tx in &txs {
        println!("{}", render_row(tx));
    }
    println!("{}", render_summary(&Summary::of(&txs)));
    Ok(txs)
}

pub async fn show(repository: &Repository, id: i64) -> Result<Transaction> {
    let tx = repository
        .transaction(id)
        .await?
        .ok_or(AppError::NotFound(id))?;
    println!("{}", render_row(&tx));
    if tx.is_deleted {
        println!("(in trash)");
    }
    Ok(tx)
}

/// Fields not given on the command line keep their stored value.
pub async fn edit(repository: &Repository, args: EditArgs) -> Result<()> {
    let current = repository
        .transaction(args.id)
        .await?
        .ok_or(AppError::NotFound(args.id))?;

    let title = args.title.unwrap_or(current.title);
    let kind = args.kind.unwrap_or(current.kind);
    let draft = match args.amount {
        Some(amount) => TransactionDraft::parse(&title, &amount, kind)?,
        None => TransactionDraft::new(&title, current.amount, kind)?,
    };

    repository.update(args.id, &draft).await?;
    println!("updated transaction {}", args.id);
    Ok(())
}

pub async fn delete(repository: &Repository, id: i64) -> Result<()> {
    if !repository.soft_delete(id).await? {
        return Err(AppError::NotFound(id));
    }
    println!("moved transaction {id} to trash");
    Ok(())
}

pub async fn restore(repository: &Repository, id: i64) -> Result<()> {
    if !repository.restore(id).await? {
        return Err(AppError::NotFound(id));
    }
    println!("restored transaction {id}");
    Ok(())
}

pub async fn sync_remote(
    repository: &Repository,
    settings: &Settings,
    args: SyncArgs,
) -> Result<SyncReport> {
    let endpoint = args
        .endpoint
        .or_else(|| settings.sync.endpoint.clone())
        .filter(|endpoint| !endpoint.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Please enter a valid API URL".to_string()))?;

    let syncer = Syncer::builder()
        .endpoint(&endpoint)
        .timeout(settings.sync.timeout_secs.map(Duration::from_secs))
        .build()?;
    let report = syncer.run(repository).await?;

    if report.is_clean() {
        println!(
            "Sync completed successfully! ({} removed, {} uploaded)",
            report.deleted.len(),
            report.uploaded.len()
        );
    } else {
        println!("Sync completed with failed items:");
        for outcome in report.failures() {
            println!("  {}: {}", outcome.id, outcome.error.as_deref().unwrap_or_default());
        }
    }
    Ok(report)
}

pub async fn serve(settings: &Settings, args: ServeArgs) -> Result<()> {
    let bind = args.bind.unwrap_or_else(|| settings.server.bind.clone());
    let port = args.port.unwrap_or(settings.server.port);
    let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}")).await?;
    server::run_with_listener(server::Collection::default(), listener).await?;
    Ok(())
}

fn render_row(tx: &Transaction) -> String {
    format!(
        "{:>5}  {}  {:<7}  {:>12}  {}",
        tx.id,
        tx.created_at.format("%Y-%m-%d %H:%M"),
        tx.kind,
        tx.amount_label(),
        tx.title
    )
}

fn render_summary(summary: &Summary) -> String {
    format!(
        "income {:.2}  expense {:.2}  balance {:.2}",
        summary.income,
        summary.expense,
        summary.balance()
    )
}
