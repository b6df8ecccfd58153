//! Posting plan compiler.
//!
//! Turns classified rows and the document header into the ordered action
//! sequence an operator would enter by hand. The phases are emitted in a
//! fixed order:
//!
//! 1. `HEADER` - document header fields
//! 2. `BANK_LINES` - one debit line per bank movement
//! 3. `ORDER_LINES` - one customer credit line per order-settled collection
//! 4. `INVOICE_LINES` - one open-item selection per invoice-settled collection
//! 5. `SAVE` - leave the selection and process open items
//! 6. `ROUNDING` - optional correction line
//! 7. `CLOSE` - leave the transaction
//!
//! Compilation is pure: the same inputs always produce the same plan, and
//! every input check runs before the first action is emitted.

use crate::action::{Phase, PlanBuilder, PostingAction, PostingPlan, SessionOpen};
use crate::classify::{classify, Batch};
use crate::codes::{PlanSettings, PostingCodes};
use crate::error::{PlanError, Result};
use crate::header::{extract_header, parse_territory};
use crate::model::{BankRow, Credentials, DocumentHeader, PreRegistroRow};
use crate::rounding::{format_amount, resolve};
use crate::screen;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Date format of the entry screen.
pub const SCREEN_DATE_FORMAT: &str = "%d.%m.%Y";

/// Everything the compiler consumes.
#[derive(Debug, Clone, Copy)]
pub struct PlanInput<'a> {
    /// Document header.
    pub header: &'a DocumentHeader,
    /// Bank movements, in sheet order.
    pub bank_rows: &'a [BankRow],
    /// Classified pre-registration rows.
    pub batch: &'a Batch,
    /// Logon credentials.
    pub credentials: &'a Credentials,
    /// Business constants.
    pub codes: &'a PostingCodes,
}

/// A validated order line.
struct OrderLine<'a> {
    client: &'a str,
    order: &'a str,
    territory: String,
    amount: Decimal,
}

/// Compile the posting plan.
pub fn compile(input: &PlanInput<'_>) -> Result<PostingPlan> {
    if input.bank_rows.is_empty() {
        return Err(PlanError::EmptyBatch);
    }
    input.credentials.validate()?;
    validate_bank(input.bank_rows)?;
    let order_lines = validate_orders(&input.batch.orders)?;

    for id in input.batch.duplicate_invoices() {
        tracing::warn!(invoice = %id, "invoice appears on more than one row; each row is cleared");
    }

    let header = input.header;
    let codes = input.codes;
    let mut plan = PlanBuilder::default();

    plan.begin(Phase::Header);
    plan.extend(header_actions(header, codes));

    plan.begin(Phase::BankLines);
    for row in input.bank_rows {
        plan.extend(bank_line(row, codes));
    }

    plan.begin(Phase::OrderLines);
    for line in &order_lines {
        plan.extend(order_line(line, header, codes));
    }

    plan.begin(Phase::InvoiceLines);
    for (i, row) in input.batch.invoices.iter().enumerate() {
        // A preceding order line leaves a pending line item that has to be
        // confirmed before the clearing selection opens.
        if i == 0 && !order_lines.is_empty() {
            plan.push(PostingAction::SendConfirm);
        }
        plan.extend(invoice_selection(row, header, codes));
    }

    plan.begin(Phase::Save);
    plan.push(PostingAction::press(screen::BTN_CLOSE_SELECTION));
    plan.push(PostingAction::press(screen::BTN_PROCESS_OPEN_ITEMS));

    plan.begin(Phase::Rounding);
    if let Some(actions) = resolve(header.rounding_amount, codes) {
        plan.extend(actions);
    }

    plan.begin(Phase::Close);
    plan.push(PostingAction::select(screen::MENU_EXIT));
    plan.push(PostingAction::SendConfirm);

    let plan = plan.finish(SessionOpen {
        user: input.credentials.user.trim().to_string(),
        secret: input.credentials.secret.clone(),
        transaction_code: codes.transaction_code.clone(),
    });

    tracing::info!(
        actions = plan.len(),
        bank_lines = input.bank_rows.len(),
        order_lines = order_lines.len(),
        invoice_lines = input.batch.invoices.len(),
        "compiled posting plan"
    );
    Ok(plan)
}

fn validate_orders(rows: &[PreRegistroRow]) -> Result<Vec<OrderLine<'_>>> {
    let mut lines = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let amount = row.amount.ok_or_else(|| {
            PlanError::invalid(
                "Importe Abonado",
                "",
                format!("order row {} has no amount", i + 1),
            )
        })?;
        check_cents("Importe Abonado", amount)?;
        let territory = parse_territory(&row.territory)?;
        lines.push(OrderLine {
            client: row.client_id.trim(),
            order: row.order_id.trim(),
            territory,
            amount,
        });
    }
    Ok(lines)
}

fn validate_bank(rows: &[BankRow]) -> Result<()> {
    rows.iter().try_for_each(|row| check_cents("IMPORTE", row.amount))
}

/// Amounts are entered with two decimals; finer values are not rounded.
fn check_cents(field: &str, amount: Decimal) -> Result<()> {
    if amount.normalize().scale() > 2 {
        return Err(PlanError::invalid(
            field,
            amount.to_string(),
            "more than two decimal places",
        ));
    }
    Ok(())
}

fn header_actions(header: &DocumentHeader, codes: &PostingCodes) -> [PostingAction; 7] {
    [
        PostingAction::header(
            screen::DOCUMENT_DATE,
            header.document_date.format(SCREEN_DATE_FORMAT).to_string(),
        ),
        PostingAction::header(screen::DOCUMENT_TYPE, &codes.document_type),
        PostingAction::header(screen::COMPANY_CODE, &header.company_code),
        PostingAction::header(screen::CURRENCY, &header.currency),
        PostingAction::header(screen::PERIOD, header.fiscal_period.to_string()),
        PostingAction::header(screen::REFERENCE, &header.territory),
        PostingAction::header(screen::HEADER_TEXT, &header.document_text),
    ]
}

fn bank_line(row: &BankRow, codes: &PostingCodes) -> [PostingAction; 6] {
    let account = row.account.trim();
    [
        PostingAction::line(screen::POSTING_KEY, &codes.bank_posting_key),
        PostingAction::line(screen::LINE_ACCOUNT, account),
        PostingAction::focus_at(screen::LINE_ACCOUNT, account.chars().count()),
        PostingAction::SendConfirm,
        PostingAction::line(screen::AMOUNT, format_amount(row.amount)),
        PostingAction::line(screen::LINE_TEXT, row.operation_ref.trim()),
    ]
}

fn order_line(line: &OrderLine<'_>, header: &DocumentHeader, codes: &PostingCodes) -> [PostingAction; 12] {
    [
        PostingAction::line(screen::POSTING_KEY, &codes.order_posting_key),
        PostingAction::line(screen::LINE_ACCOUNT, line.client),
        PostingAction::line(screen::SPECIAL_GL, &codes.order_special_gl),
        PostingAction::focus_at(screen::SPECIAL_GL, codes.order_special_gl.chars().count()),
        PostingAction::SendConfirm,
        PostingAction::SendConfirm,
        PostingAction::line(screen::AMOUNT, format_amount(line.amount)),
        PostingAction::line(
            screen::BASELINE_DATE,
            header.posting_date.format(SCREEN_DATE_FORMAT).to_string(),
        ),
        PostingAction::line(screen::ASSIGNMENT, &line.territory),
        PostingAction::line(screen::SALES_ORDER, line.order),
        PostingAction::line(screen::SALES_ORDER_ITEM, &codes.order_item),
        PostingAction::line(screen::SCHEDULE_LINE, &codes.order_schedule_line),
    ]
}

fn invoice_selection(
    row: &PreRegistroRow,
    header: &DocumentHeader,
    codes: &PostingCodes,
) -> [PostingAction; 9] {
    [
        PostingAction::select(screen::CLEARING_RADIO),
        PostingAction::line(screen::CLEARING_COMPANY, &header.company_code),
        PostingAction::line(screen::CLEARING_ACCOUNT, row.client_id.trim()),
        PostingAction::line(screen::CLEARING_ACCOUNT_TYPE, &codes.clearing_account_type),
        PostingAction::line(screen::CLEARING_SPECIAL_GL, &codes.clearing_special_gl),
        PostingAction::focus(screen::CLEARING_RADIO),
        PostingAction::press(screen::BTN_CLEARING_SELECTION),
        PostingAction::line_with_caret(screen::SELECTION_VALUE, row.invoice_id.trim()),
        PostingAction::press(screen::BTN_PROCESS_SELECTION),
    ]
}

/// A compiled document together with the intermediate results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDocument {
    /// Classified rows.
    pub batch: Batch,
    /// Extracted header.
    pub header: DocumentHeader,
    /// The plan.
    pub plan: PostingPlan,
}

/// Run the whole pipeline: classify, extract the header, compile.
///
/// Fails on the first invalid input; nothing is returned for replay unless
/// every check passed.
pub fn build_plan(
    preregistro: &[PreRegistroRow],
    bank_rows: &[BankRow],
    credentials: &Credentials,
    today: NaiveDate,
    settings: &PlanSettings,
) -> Result<CompiledDocument> {
    let batch = classify(preregistro)?;
    if bank_rows.is_empty() {
        return Err(PlanError::EmptyBatch);
    }
    let header = extract_header(bank_rows, &batch.invoices, today, settings)?;
    let plan = compile(&PlanInput {
        header: &header,
        bank_rows,
        batch: &batch,
        credentials,
        codes: &settings.codes,
    })?;
    Ok(CompiledDocument {
        batch,
        header,
        plan,
    })
}
