//! `paydesk` — command-line client for the operations portal

mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use pd_auth::{FileSessionStore, Section, SessionStore};
use pd_client::{ApiClient, PollOutcome};
use pd_core::pagination::PageQuery;
use pd_core::types::Id;
use pd_core::ClientConfig;
use pd_models::{
    ChangePasswordRequest, ContractCreateRequest, ContractSignRequest, InvoiceCreateRequest,
    InvoiceStatus, InvoiceStatusUpdate, LoginRequest, PaymentMethod, PayoutInitiateRequest,
    QuoteCreateRequest, Transaction, TransactionInitiateRequest, UserCreateRequest, UserRole,
    UserUpdateRequest, VerificationRequest,
};
use pd_services::{
    AuditService, AuthService, ContractsService, InvoicesService, NotificationsService,
    PaymentsService, PayoutsService, QuotesService, ReceiptsService, ReportsService, UsersService,
    VerificationService,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use output::*;

#[derive(Parser)]
#[command(name = "paydesk", version, about = "Client for the PayDesk operations portal")]
struct Cli {
    /// Emit raw JSON responses instead of formatted lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and persist the session
    Login {
        username: String,
        password: String,
    },
    /// Discard the local session
    Logout,
    /// Show the signed-in user's profile
    Profile,
    /// Show which portal sections the current role can reach
    Sections,
    /// Change the account password
    ChangePassword {
        old_password: String,
        new_password: String,
    },
    /// Flag the account for an admin-performed password reset
    RequestReset,
    /// Payments: initiation, status and listings
    #[command(subcommand)]
    Payments(PaymentsCommand),
    /// B2C payouts (admin)
    #[command(subcommand)]
    Payouts(PayoutsCommand),
    /// Contracts and public signing
    #[command(subcommand)]
    Contracts(ContractsCommand),
    /// Quotes
    #[command(subcommand)]
    Quotes(QuotesCommand),
    /// Invoices
    #[command(subcommand)]
    Invoices(InvoicesCommand),
    /// Receipts
    #[command(subcommand)]
    Receipts(ReceiptsCommand),
    /// In-app notifications
    #[command(subcommand)]
    Notifications(NotificationsCommand),
    /// User management (admin)
    #[command(subcommand)]
    Users(UsersCommand),
    /// Audit trail (admin)
    #[command(subcommand)]
    Audit(AuditCommand),
    /// Verify a document code (no login needed)
    Verify { document_code: String },
    /// Verification attempt history
    VerificationLogs(ListArgs),
    /// Dashboard summary and trends
    Dashboard {
        /// Days of revenue history to include
        #[arg(long)]
        days: Option<u32>,
        /// Weeks of trend history to include
        #[arg(long)]
        weeks: Option<u32>,
    },
}

#[derive(Args, Default)]
struct ListArgs {
    /// Page number
    #[arg(long)]
    page: Option<u32>,
    /// Items per page
    #[arg(long)]
    page_size: Option<u32>,
    /// Search term
    #[arg(long)]
    search: Option<String>,
    /// Ordering field; prefix with '-' to reverse
    #[arg(long)]
    ordering: Option<String>,
}

impl ListArgs {
    fn query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
            search: self.search.clone(),
            ordering: self.ordering.clone(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Mpesa,
    Paystack,
}

impl From<MethodArg> for PaymentMethod {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::Mpesa => PaymentMethod::Mpesa,
            MethodArg::Paystack => PaymentMethod::Paystack,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Admin,
    Staff,
}

impl From<RoleArg> for UserRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Admin => UserRole::Admin,
            RoleArg::Staff => UserRole::Staff,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum InvoiceStatusArg {
    Paid,
    Cancelled,
}

impl From<InvoiceStatusArg> for InvoiceStatus {
    fn from(value: InvoiceStatusArg) -> Self {
        match value {
            InvoiceStatusArg::Paid => InvoiceStatus::Paid,
            InvoiceStatusArg::Cancelled => InvoiceStatus::Cancelled,
        }
    }
}

#[derive(Subcommand)]
enum PaymentsCommand {
    /// Start a payment; M-Pesa payments can be watched to completion
    Initiate {
        #[arg(long)]
        amount: String,
        #[arg(long, value_enum, default_value = "mpesa")]
        method: MethodArg,
        /// Subscriber phone for M-Pesa (2547XXXXXXXX)
        #[arg(long)]
        phone: Option<String>,
        /// Customer email for Paystack
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Poll until the payment completes or fails
        #[arg(long)]
        watch: bool,
    },
    /// Poll an existing transaction until it turns terminal
    Watch { reference: String },
    /// One-off status fetch
    Status { reference: String },
    /// Full transaction record
    Detail { reference: String },
    List(ListArgs),
    Summary,
    /// Cash ledger entries
    Ledger(ListArgs),
}

#[derive(Subcommand)]
enum PayoutsCommand {
    Initiate {
        #[arg(long)]
        recipient_name: String,
        /// Recipient phone (2547XXXXXXXX)
        #[arg(long)]
        recipient_phone: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        reason: String,
        /// Poll until the payout completes or fails
        #[arg(long)]
        watch: bool,
    },
    Watch { id: Id },
    Get { id: Id },
    List(ListArgs),
    Summary,
}

#[derive(Subcommand)]
enum ContractsCommand {
    List(ListArgs),
    Get { id: Id },
    Create {
        #[arg(long)]
        client_name: String,
        #[arg(long)]
        client_email: String,
        #[arg(long)]
        client_phone: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: String,
    },
    /// Public contract view by signing token
    View { token: String },
    /// Submit a signature through the public signing endpoint
    Sign {
        token: String,
        /// Base64 signature image
        #[arg(long)]
        signature: String,
        #[arg(long)]
        place: String,
    },
}

#[derive(Subcommand)]
enum QuotesCommand {
    List(ListArgs),
    Get { id: Id },
    Create {
        #[arg(long)]
        client_name: String,
        #[arg(long)]
        client_email: String,
        #[arg(long)]
        client_phone: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: String,
    },
    /// Public quote view by reference code
    View { reference: String },
}

#[derive(Subcommand)]
enum InvoicesCommand {
    List(ListArgs),
    Get { id: Id },
    Create {
        #[arg(long)]
        client_name: String,
        #[arg(long)]
        client_email: String,
        #[arg(long)]
        client_phone: String,
        #[arg(long)]
        client_company: Option<String>,
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        tax_amount: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<chrono::NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Mark PAID (with its payment reference) or CANCELLED
    SetStatus {
        id: Id,
        #[arg(value_enum)]
        status: InvoiceStatusArg,
        #[arg(long)]
        payment_reference: Option<String>,
    },
    /// Email the invoice to the client
    Send { id: Id },
    /// Download the PDF
    Download {
        id: Id,
        #[arg(long, default_value = "invoice.pdf")]
        out: PathBuf,
    },
    Overdue(ListArgs),
}

#[derive(Subcommand)]
enum ReceiptsCommand {
    List(ListArgs),
    Get { id: Id },
    /// Generate a receipt for a completed transaction
    Generate { transaction_id: Id },
    Download {
        id: Id,
        #[arg(long, default_value = "receipt.pdf")]
        out: PathBuf,
    },
    /// Email the receipt to the payer
    Email { id: Id },
    /// Receipt attached to a transaction
    ForTransaction { transaction_id: Id },
}

#[derive(Subcommand)]
enum NotificationsCommand {
    List(ListArgs),
    Get { id: Id },
    MarkRead { id: Id },
    MarkAllRead,
    UnreadCount,
}

#[derive(Subcommand)]
enum UsersCommand {
    List(ListArgs),
    Get { id: Id },
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, value_enum, default_value = "staff")]
        role: RoleArg,
    },
    Update {
        id: Id,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
        #[arg(long)]
        locked: Option<bool>,
    },
    Delete { id: Id },
    /// Resolve a pending password-reset request
    AdminReset {
        request_id: Id,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
enum AuditCommand {
    Logs(ListArgs),
    Log { id: Id },
    Sessions(ListArgs),
    ActiveStatus,
    /// The signed-in user's own history
    MyLogs(ListArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let store: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::new(config.session_path.clone()));
    let client = ApiClient::new(config, store)?;

    run(cli, &client).await
}

async fn run(cli: Cli, client: &ApiClient) -> anyhow::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Login { username, password } => {
            let response = AuthService::new(client)
                .login(&LoginRequest { username, password })
                .await?;
            println!("signed in as {} ({})", response.first_name, response.role);
            if response.must_change_password {
                println!("note: the server requires a password change before further use");
            }
        }
        Command::Logout => {
            AuthService::new(client).logout()?;
            println!("signed out");
        }
        Command::Profile => {
            let user = AuthService::new(client).profile().await?;
            emit(json, &user, |u| println!("{}", user_line(u)))?;
        }
        Command::Sections => {
            let session = client
                .current_session()
                .context("no session, sign in first")?;
            let role = session.role().context("session has no user, sign in again")?;
            for section in Section::accessible(role) {
                println!("{}", section);
            }
        }
        Command::ChangePassword {
            old_password,
            new_password,
        } => {
            AuthService::new(client)
                .change_password(&ChangePasswordRequest {
                    old_password,
                    new_password,
                })
                .await?;
            println!("password changed");
        }
        Command::RequestReset => {
            AuthService::new(client).request_password_reset().await?;
            println!("reset request submitted; an administrator will follow up");
        }
        Command::Payments(command) => run_payments(command, client, json).await?,
        Command::Payouts(command) => run_payouts(command, client, json).await?,
        Command::Contracts(command) => run_contracts(command, client, json).await?,
        Command::Quotes(command) => run_quotes(command, client, json).await?,
        Command::Invoices(command) => run_invoices(command, client, json).await?,
        Command::Receipts(command) => run_receipts(command, client, json).await?,
        Command::Notifications(command) => run_notifications(command, client, json).await?,
        Command::Users(command) => run_users(command, client, json).await?,
        Command::Audit(command) => run_audit(command, client, json).await?,
        Command::Verify { document_code } => {
            let response = VerificationService::new(client)
                .check(&VerificationRequest { document_code })
                .await?;
            emit(json, &response, |v| {
                let verdict = if v.is_valid { "VALID" } else { "INVALID" };
                println!("{}: {} ({})", v.document_code, verdict, v.message);
            })?;
        }
        Command::VerificationLogs(args) => {
            let page = VerificationService::new(client).logs(&args.query()).await?;
            emit_page(json, &page, verification_log_line)?;
        }
        Command::Dashboard { days, weeks } => {
            let reports = ReportsService::new(client);
            let summary = reports.dashboard_summary().await?;
            emit(json, &summary, |s| {
                println!("revenue:           {}", s.total_revenue);
                println!("transactions:      {}", s.total_transactions);
                println!("payouts:           {}", s.total_payouts);
                println!("active users:      {}", s.active_users);
                println!("pending contracts: {}", s.pending_contracts);
                println!("overdue invoices:  {}", s.overdue_invoices);
            })?;
            if days.is_some() {
                let chart = reports.revenue_chart(days).await?;
                emit(json, &chart, |points| {
                    for point in points {
                        println!("{}  {:>12}  ({} txns)", point.date, point.amount, point.transaction_count);
                    }
                })?;
            }
            if weeks.is_some() {
                let trend = reports.weekly_trend(weeks).await?;
                emit(json, &trend, |points| {
                    for point in points {
                        println!("{}  {:>12}  {:+.1}%", point.label, point.value, point.percentage_change);
                    }
                })?;
            }
        }
    }
    Ok(())
}

/// Cancellation token wired to Ctrl-C, the CLI's teardown analogue.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let guard = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            guard.cancel();
        }
    });
    cancel
}

async fn surface_watch_outcome(
    outcome: PollOutcome<Transaction>,
    client: &ApiClient,
    json: bool,
) -> anyhow::Result<()> {
    match outcome {
        PollOutcome::Terminal(transaction) => {
            emit(json, &transaction, |t| {
                println!("{}", transaction_line(t));
                if let Some(reason) = &t.failed_reason {
                    println!("failed: {}", reason);
                }
            })?;
            // the result stays on screen for the configured display window
            tokio::time::sleep(client.config().poll_display_delay).await;
        }
        PollOutcome::Cancelled => println!("watch cancelled"),
        PollOutcome::TimedOut => println!("gave up waiting; the payment may still complete"),
    }
    Ok(())
}

async fn run_payments(
    command: PaymentsCommand,
    client: &ApiClient,
    json: bool,
) -> anyhow::Result<()> {
    let payments = PaymentsService::new(client);
    match command {
        PaymentsCommand::Initiate {
            amount,
            method,
            phone,
            email,
            description,
            watch,
        } => {
            let request = TransactionInitiateRequest {
                amount,
                payment_method: method.into(),
                phone_number: phone,
                email,
                description,
            };
            let response = payments.initiate(&request).await?;
            let reference = response.transaction.reference_code.clone();
            if let Some(url) = &response.authorization_url {
                println!("complete the payment at: {}", url);
            } else {
                println!("{} — {}", reference, response.message);
            }
            if watch && response.transaction.payment_method == PaymentMethod::Mpesa {
                let cancel = cancel_on_ctrl_c();
                let outcome = payments.watch(&reference, &cancel).await;
                surface_watch_outcome(outcome, client, json).await?;
            }
        }
        PaymentsCommand::Watch { reference } => {
            let cancel = cancel_on_ctrl_c();
            let outcome = payments.watch(&reference, &cancel).await;
            surface_watch_outcome(outcome, client, json).await?;
        }
        PaymentsCommand::Status { reference } => {
            let transaction = payments.status(&reference).await?;
            emit(json, &transaction, |t| println!("{}", transaction_line(t)))?;
        }
        PaymentsCommand::Detail { reference } => {
            let transaction = payments.detail(&reference).await?;
            emit(json, &transaction, |t| {
                println!("{}", transaction_line(t));
                println!("description: {}", t.description);
                if let Some(provider) = &t.provider_reference {
                    println!("provider reference: {}", provider);
                }
            })?;
        }
        PaymentsCommand::List(args) => {
            let page = payments.list(&args.query()).await?;
            emit_page(json, &page, transaction_line)?;
        }
        PaymentsCommand::Summary => {
            let summary = payments.summary().await?;
            emit(json, &summary, |s| {
                println!(
                    "{} transactions, {} total ({} completed, {} pending, {} failed)",
                    s.total_transactions,
                    s.total_amount,
                    s.completed_transactions,
                    s.pending_transactions,
                    s.failed_transactions
                );
            })?;
        }
        PaymentsCommand::Ledger(args) => {
            let page = payments.ledger(&args.query()).await?;
            emit_page(json, &page, ledger_line)?;
        }
    }
    Ok(())
}

async fn run_payouts(
    command: PayoutsCommand,
    client: &ApiClient,
    json: bool,
) -> anyhow::Result<()> {
    let payouts = PayoutsService::new(client);
    match command {
        PayoutsCommand::Initiate {
            recipient_name,
            recipient_phone,
            amount,
            reason,
            watch,
        } => {
            let request = PayoutInitiateRequest {
                recipient_name,
                recipient_phone,
                amount,
                reason,
            };
            let response = payouts.initiate(&request).await?;
            println!("{} — {}", response.payout.reference_code, response.message);
            if watch {
                let cancel = cancel_on_ctrl_c();
                let outcome = payouts.watch(response.payout.id, &cancel).await;
                match outcome {
                    PollOutcome::Terminal(payout) => {
                        emit(json, &payout, |p| println!("{}", payout_line(p)))?;
                        tokio::time::sleep(client.config().poll_display_delay).await;
                    }
                    PollOutcome::Cancelled => println!("watch cancelled"),
                    PollOutcome::TimedOut => println!("gave up waiting"),
                }
            }
        }
        PayoutsCommand::Watch { id } => {
            let cancel = cancel_on_ctrl_c();
            match payouts.watch(id, &cancel).await {
                PollOutcome::Terminal(payout) => {
                    emit(json, &payout, |p| {
                        println!("{}", payout_line(p));
                        if let Some(reason) = &p.failed_reason {
                            println!("failed: {}", reason);
                        }
                    })?;
                    tokio::time::sleep(client.config().poll_display_delay).await;
                }
                PollOutcome::Cancelled => println!("watch cancelled"),
                PollOutcome::TimedOut => println!("gave up waiting"),
            }
        }
        PayoutsCommand::Get { id } => {
            let payout = payouts.get(id).await?;
            emit(json, &payout, |p| println!("{}", payout_line(p)))?;
        }
        PayoutsCommand::List(args) => {
            let page = payouts.list(&args.query()).await?;
            emit_page(json, &page, payout_line)?;
        }
        PayoutsCommand::Summary => {
            let summary = payouts.summary().await?;
            emit(json, &summary, |s| {
                println!(
                    "{} payouts, {} total ({} completed, {} pending, {} failed)",
                    s.total_payouts,
                    s.total_amount,
                    s.completed_payouts,
                    s.pending_payouts,
                    s.failed_payouts
                );
            })?;
        }
    }
    Ok(())
}

async fn run_contracts(
    command: ContractsCommand,
    client: &ApiClient,
    json: bool,
) -> anyhow::Result<()> {
    let contracts = ContractsService::new(client);
    match command {
        ContractsCommand::List(args) => {
            let page = contracts.list(&args.query()).await?;
            emit_page(json, &page, contract_line)?;
        }
        ContractsCommand::Get { id } => {
            let contract = contracts.get(id).await?;
            emit(json, &contract, |c| {
                println!("{}", contract_line(c));
                println!("signing token: {}", c.signing_token);
            })?;
        }
        ContractsCommand::Create {
            client_name,
            client_email,
            client_phone,
            description,
            amount,
        } => {
            let contract = contracts
                .create(&ContractCreateRequest {
                    client_name,
                    client_email,
                    client_phone,
                    service_description: description,
                    amount,
                })
                .await?;
            emit(json, &contract, |c| {
                println!("created {}", contract_line(c));
                println!("signing token: {}", c.signing_token);
            })?;
        }
        ContractsCommand::View { token } => {
            let contract = contracts.public_view(&token).await?;
            emit(json, &contract, |c| println!("{}", contract_line(c)))?;
        }
        ContractsCommand::Sign {
            token,
            signature,
            place,
        } => {
            let contract = contracts
                .sign(
                    &token,
                    &ContractSignRequest {
                        signature_image: signature,
                        place_of_signing: place,
                    },
                )
                .await?;
            emit(json, &contract, |c| println!("signed: {}", contract_line(c)))?;
        }
    }
    Ok(())
}

async fn run_quotes(command: QuotesCommand, client: &ApiClient, json: bool) -> anyhow::Result<()> {
    let quotes = QuotesService::new(client);
    match command {
        QuotesCommand::List(args) => {
            let page = quotes.list(&args.query()).await?;
            emit_page(json, &page, quote_line)?;
        }
        QuotesCommand::Get { id } => {
            let quote = quotes.get(id).await?;
            emit(json, &quote, |q| println!("{}", quote_line(q)))?;
        }
        QuotesCommand::Create {
            client_name,
            client_email,
            client_phone,
            description,
            amount,
        } => {
            let quote = quotes
                .create(&QuoteCreateRequest {
                    client_name,
                    client_email,
                    client_phone,
                    service_description: description,
                    amount,
                })
                .await?;
            emit(json, &quote, |q| println!("created {}", quote_line(q)))?;
        }
        QuotesCommand::View { reference } => {
            let quote = quotes.public_view(&reference).await?;
            emit(json, &quote, |q| println!("{}", quote_line(q)))?;
        }
    }
    Ok(())
}

async fn run_invoices(
    command: InvoicesCommand,
    client: &ApiClient,
    json: bool,
) -> anyhow::Result<()> {
    let invoices = InvoicesService::new(client);
    match command {
        InvoicesCommand::List(args) => {
            let page = invoices.list(&args.query()).await?;
            emit_page(json, &page, invoice_line)?;
        }
        InvoicesCommand::Get { id } => {
            let invoice = invoices.get(id).await?;
            emit(json, &invoice, |i| println!("{}", invoice_line(i)))?;
        }
        InvoicesCommand::Create {
            client_name,
            client_email,
            client_phone,
            client_company,
            description,
            amount,
            tax_amount,
            due_date,
            notes,
        } => {
            let invoice = invoices
                .create(&InvoiceCreateRequest {
                    client_name,
                    client_email,
                    client_phone,
                    client_company,
                    service_description: description,
                    amount,
                    tax_amount,
                    due_date,
                    notes,
                })
                .await?;
            emit(json, &invoice, |i| println!("created {}", invoice_line(i)))?;
        }
        InvoicesCommand::SetStatus {
            id,
            status,
            payment_reference,
        } => {
            let invoice = invoices
                .update_status(
                    id,
                    &InvoiceStatusUpdate {
                        status: status.into(),
                        payment_reference,
                    },
                )
                .await?;
            emit(json, &invoice, |i| println!("{}", invoice_line(i)))?;
        }
        InvoicesCommand::Send { id } => {
            invoices.send(id).await?;
            println!("invoice sent");
        }
        InvoicesCommand::Download { id, out } => {
            let bytes = invoices.download(id).await?;
            std::fs::write(&out, &bytes)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {} ({} bytes)", out.display(), bytes.len());
        }
        InvoicesCommand::Overdue(args) => {
            let page = invoices.overdue(&args.query()).await?;
            emit_page(json, &page, invoice_line)?;
        }
    }
    Ok(())
}

async fn run_receipts(
    command: ReceiptsCommand,
    client: &ApiClient,
    json: bool,
) -> anyhow::Result<()> {
    let receipts = ReceiptsService::new(client);
    match command {
        ReceiptsCommand::List(args) => {
            let page = receipts.list(&args.query()).await?;
            emit_page(json, &page, receipt_line)?;
        }
        ReceiptsCommand::Get { id } => {
            let receipt = receipts.get(id).await?;
            emit(json, &receipt, |r| println!("{}", receipt_line(r)))?;
        }
        ReceiptsCommand::Generate { transaction_id } => {
            let receipt = receipts.generate(transaction_id).await?;
            emit(json, &receipt, |r| println!("generated {}", receipt_line(r)))?;
        }
        ReceiptsCommand::Download { id, out } => {
            let bytes = receipts.download(id).await?;
            std::fs::write(&out, &bytes)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {} ({} bytes)", out.display(), bytes.len());
        }
        ReceiptsCommand::Email { id } => {
            receipts.email(id).await?;
            println!("receipt emailed");
        }
        ReceiptsCommand::ForTransaction { transaction_id } => {
            let receipt = receipts.for_transaction(transaction_id).await?;
            emit(json, &receipt, |r| println!("{}", receipt_line(r)))?;
        }
    }
    Ok(())
}

async fn run_notifications(
    command: NotificationsCommand,
    client: &ApiClient,
    json: bool,
) -> anyhow::Result<()> {
    let notifications = NotificationsService::new(client);
    match command {
        NotificationsCommand::List(args) => {
            let page = notifications.list(&args.query()).await?;
            emit_page(json, &page, notification_line)?;
        }
        NotificationsCommand::Get { id } => {
            let notification = notifications.get(id).await?;
            emit(json, &notification, |n| println!("{}", notification_line(n)))?;
        }
        NotificationsCommand::MarkRead { id } => {
            notifications.mark_read(id).await?;
            println!("marked read");
        }
        NotificationsCommand::MarkAllRead => {
            notifications.mark_all_read().await?;
            println!("all notifications marked read");
        }
        NotificationsCommand::UnreadCount => {
            let count = notifications.unread_count().await?;
            emit(json, &count, |c| println!("{}", c.unread_count))?;
        }
    }
    Ok(())
}

async fn run_users(command: UsersCommand, client: &ApiClient, json: bool) -> anyhow::Result<()> {
    let users = UsersService::new(client);
    match command {
        UsersCommand::List(args) => {
            let page = users.list(&args.query()).await?;
            emit_page(json, &page, user_line)?;
        }
        UsersCommand::Get { id } => {
            let user = users.get(id).await?;
            emit(json, &user, |u| println!("{}", user_line(u)))?;
        }
        UsersCommand::Create {
            username,
            email,
            first_name,
            last_name,
            phone,
            role,
        } => {
            let user = users
                .create(&UserCreateRequest {
                    username,
                    email,
                    first_name,
                    last_name,
                    phone_number: phone,
                    role: role.into(),
                })
                .await?;
            emit(json, &user, |u| println!("created {}", user_line(u)))?;
        }
        UsersCommand::Update {
            id,
            email,
            first_name,
            last_name,
            phone,
            role,
            locked,
        } => {
            let user = users
                .update(
                    id,
                    &UserUpdateRequest {
                        email,
                        first_name,
                        last_name,
                        phone_number: phone,
                        role: role.map(Into::into),
                        is_locked: locked,
                    },
                )
                .await?;
            emit(json, &user, |u| println!("{}", user_line(u)))?;
        }
        UsersCommand::Delete { id } => {
            users.delete(id).await?;
            println!("user deleted");
        }
        UsersCommand::AdminReset { request_id, note } => {
            let record = users
                .admin_reset(
                    request_id,
                    &pd_models::AdminResetRequest { admin_note: note },
                )
                .await?;
            emit(json, &record, |r| {
                let state = if r.is_resolved { "resolved" } else { "open" };
                println!("reset request #{} for user {}: {}", r.id, r.user, state);
            })?;
        }
    }
    Ok(())
}

async fn run_audit(command: AuditCommand, client: &ApiClient, json: bool) -> anyhow::Result<()> {
    let audit = AuditService::new(client);
    match command {
        AuditCommand::Logs(args) => {
            let page = audit.logs(&args.query()).await?;
            emit_page(json, &page, audit_line)?;
        }
        AuditCommand::Log { id } => {
            let log = audit.log(id).await?;
            emit(json, &log, |l| {
                println!("{}", audit_line(l));
                println!("metadata: {}", l.metadata);
            })?;
        }
        AuditCommand::Sessions(args) => {
            let page = audit.sessions(&args.query()).await?;
            emit_page(json, &page, session_line)?;
        }
        AuditCommand::ActiveStatus => {
            let statuses = audit.active_status().await?;
            emit(json, &statuses, |list| {
                for status in list {
                    println!("{}", active_status_line(status));
                }
            })?;
        }
        AuditCommand::MyLogs(args) => {
            let page = audit.my_logs(&args.query()).await?;
            emit_page(json, &page, audit_line)?;
        }
    }
    Ok(())
}
