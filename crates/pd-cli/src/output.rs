//! Line-oriented output helpers
//!
//! Every command can emit raw JSON with `--json`; the default is one line
//! per record for scanning and grepping.

use pd_core::pagination::Page;
use pd_models::{
    ActiveStatus, AuditLog, Contract, Invoice, LedgerEntry, Notification, Payout, Quote, Receipt,
    Transaction, User, UserSession, VerificationLog,
};
use serde::Serialize;

/// Print a single value: JSON when requested, otherwise through the
/// provided formatter.
pub fn emit<T: Serialize>(
    json: bool,
    value: &T,
    human: impl FnOnce(&T),
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

/// Print a page of records, one line each, with a trailing count/next hint.
pub fn emit_page<T: Serialize>(
    json: bool,
    page: &Page<T>,
    line: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }
    for item in &page.results {
        println!("{}", line(item));
    }
    match page.next_page() {
        Some(next) => println!("-- {} total, continue with --page {}", page.count, next),
        None => println!("-- {} total", page.count),
    }
    Ok(())
}

pub fn transaction_line(t: &Transaction) -> String {
    format!(
        "{}  {:<9}  {:>12}  {:<8}  {}  {}",
        t.reference_code,
        t.status,
        t.amount,
        t.payment_method,
        t.created_at.format("%Y-%m-%d %H:%M"),
        t.user_username
    )
}

pub fn payout_line(p: &Payout) -> String {
    format!(
        "#{:<5} {}  {:<9}  {:>12}  {}  {}",
        p.id,
        p.reference_code,
        p.status,
        p.amount,
        p.recipient_phone,
        p.recipient_name
    )
}

pub fn contract_line(c: &Contract) -> String {
    format!(
        "#{:<5} {}  {:<9}  {:>12}  {}",
        c.id, c.reference_code, c.status, c.amount, c.client_name
    )
}

pub fn quote_line(q: &Quote) -> String {
    format!(
        "#{:<5} {}  {:<9}  {:>12}  {}",
        q.id, q.reference_code, q.status, q.amount, q.client_name
    )
}

pub fn invoice_line(i: &Invoice) -> String {
    format!(
        "#{:<5} {}  {:<9}  {:>12}  due {}  {}",
        i.id, i.reference_code, i.status, i.total_amount, i.due_date, i.client_name
    )
}

pub fn receipt_line(r: &Receipt) -> String {
    format!(
        "#{:<5} {}  for {}  {:>12}  downloads: {}",
        r.id, r.reference_code, r.transaction_reference, r.transaction_amount, r.download_count
    )
}

pub fn ledger_line(e: &LedgerEntry) -> String {
    format!(
        "{}  {:<6}  {:>12}  balance {:>12}  {}",
        e.created_at.format("%Y-%m-%d %H:%M"),
        format!("{:?}", e.entry_type).to_uppercase(),
        e.amount,
        e.balance_after,
        e.description
    )
}

pub fn notification_line(n: &Notification) -> String {
    let read = if n.is_read { " " } else { "*" };
    format!(
        "{} #{:<5} {:<8?}  {}  {}",
        read, n.id, n.priority, n.title, n.message
    )
}

pub fn user_line(u: &User) -> String {
    let locked = if u.is_locked { "  [locked]" } else { "" };
    format!(
        "#{:<5} {:<16} {:<6} {}  {}{}",
        u.id,
        u.username,
        u.role,
        u.full_name(),
        u.email,
        locked
    )
}

pub fn audit_line(log: &AuditLog) -> String {
    format!(
        "{}  {:<24?}  {:<12}  {}",
        log.timestamp.format("%Y-%m-%d %H:%M:%S"),
        log.action,
        log.username.as_deref().unwrap_or("-"),
        log.description
    )
}

pub fn session_line(s: &UserSession) -> String {
    let state = if s.is_active { "active" } else { "closed" };
    format!(
        "#{:<5} {:<12}  {}  last seen {}  {}",
        s.id,
        s.username.as_deref().unwrap_or("-"),
        state,
        s.last_seen.format("%Y-%m-%d %H:%M"),
        s.ip_address.as_deref().unwrap_or("-")
    )
}

pub fn active_status_line(s: &ActiveStatus) -> String {
    let state = if s.is_active { "online" } else { "offline" };
    let seen = s
        .last_seen
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string());
    format!("{:<16} {:<6} {:<8} last seen {}", s.username, s.role, state, seen)
}

pub fn verification_log_line(v: &VerificationLog) -> String {
    let verdict = if v.is_valid { "valid" } else { "invalid" };
    format!(
        "{}  {:<12}  {:<8}  from {}",
        v.verified_at.format("%Y-%m-%d %H:%M"),
        v.document_code,
        verdict,
        v.ip_address
    )
}
