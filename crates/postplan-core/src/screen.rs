//! Element ids of the accounting entry screens.
//!
//! These are the scripting ids of the logon screen and of the
//! "post incoming payment with clearing" transaction. Actions reference
//! elements only through these constants.

/// Main window; target of confirm keystrokes.
pub const MAIN_WINDOW: &str = "wnd[0]";
/// Command field (transaction code).
pub const COMMAND_FIELD: &str = "wnd[0]/tbar[0]/okcd";

/// Logon user name.
pub const LOGON_USER: &str = "wnd[0]/usr/txtRSYST-BNAME";
/// Logon password.
pub const LOGON_PASSWORD: &str = "wnd[0]/usr/pwdRSYST-BCODE";

/// Document date.
pub const DOCUMENT_DATE: &str = "wnd[0]/usr/ctxtBKPF-BLDAT";
/// Document type.
pub const DOCUMENT_TYPE: &str = "wnd[0]/usr/ctxtBKPF-BLART";
/// Company code.
pub const COMPANY_CODE: &str = "wnd[0]/usr/ctxtBKPF-BUKRS";
/// Fiscal period.
pub const PERIOD: &str = "wnd[0]/usr/txtBKPF-MONAT";
/// Document currency.
pub const CURRENCY: &str = "wnd[0]/usr/ctxtBKPF-WAERS";
/// Reference document number.
pub const REFERENCE: &str = "wnd[0]/usr/txtBKPF-XBLNR";
/// Document header text.
pub const HEADER_TEXT: &str = "wnd[0]/usr/txtBKPF-BKTXT";

/// Posting key of the next line item.
pub const POSTING_KEY: &str = "wnd[0]/usr/ctxtRF05A-NEWBS";
/// Account of the next line item.
pub const LINE_ACCOUNT: &str = "wnd[0]/usr/ctxtRF05A-NEWKO";
/// Special G/L indicator of the next line item.
pub const SPECIAL_GL: &str = "wnd[0]/usr/ctxtRF05A-NEWUM";

/// Line amount.
pub const AMOUNT: &str = "wnd[0]/usr/txtBSEG-WRBTR";
/// Line text.
pub const LINE_TEXT: &str = "wnd[0]/usr/ctxtBSEG-SGTXT";
/// Baseline date for the due date.
pub const BASELINE_DATE: &str = "wnd[0]/usr/ctxtBSEG-ZFBDT";
/// Assignment.
pub const ASSIGNMENT: &str = "wnd[0]/usr/txtBSEG-ZUONR";
/// Sales document.
pub const SALES_ORDER: &str = "wnd[0]/usr/ctxtBSEG-VBEL2";
/// Sales document item.
pub const SALES_ORDER_ITEM: &str = "wnd[0]/usr/ctxtBSEG-POSN2";
/// Schedule line.
pub const SCHEDULE_LINE: &str = "wnd[0]/usr/ctxtBSEG-ETEN2";

/// "Document number" radio option of the open-item selection.
pub const CLEARING_RADIO: &str = "wnd[0]/usr/sub:SAPMF05A:0710/radRF05A-XPOS1[3,0]";
/// Clearing company code.
pub const CLEARING_COMPANY: &str = "wnd[0]/usr/ctxtRF05A-AGBUK";
/// Clearing account.
pub const CLEARING_ACCOUNT: &str = "wnd[0]/usr/ctxtRF05A-AGKON";
/// Clearing account type.
pub const CLEARING_ACCOUNT_TYPE: &str = "wnd[0]/usr/ctxtRF05A-AGKOA";
/// Clearing special G/L indicators.
pub const CLEARING_SPECIAL_GL: &str = "wnd[0]/usr/ctxtRF05A-AGUMS";
/// First selection value (invoice number).
pub const SELECTION_VALUE: &str = "wnd[0]/usr/sub:SAPMF05A:0731/txtRF05A-SEL01[0,0]";

/// "Choose open items" button.
pub const BTN_CLEARING_SELECTION: &str = "wnd[0]/tbar[1]/btn[16]";
/// "Process open items" button of the selection screen.
pub const BTN_PROCESS_SELECTION: &str = "wnd[0]/tbar[1]/btn[7]";
/// Leaves the selection screen.
pub const BTN_CLOSE_SELECTION: &str = "wnd[0]/tbar[0]/btn[12]";
/// Processes the open items and posts pending lines.
pub const BTN_PROCESS_OPEN_ITEMS: &str = "wnd[0]/tbar[1]/btn[14]";

/// Menu entry leaving the transaction.
pub const MENU_EXIT: &str = "wnd[0]/mbar/menu[0]/menu[3]";
