//! # Front Desk Shell
//!
//! A numbered menu read line by line. Each choice prompts for the fields
//! of one form, calls a command, and prints the outcome. Errors are printed
//! and the menu comes back; only end of input or `0` leaves the loop.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  loop {                                                                 │
//! │      print menu                                                         │
//! │      read choice ───────── EOF ──► return                               │
//! │      prompt fields ─────── EOF ──► return                               │
//! │      command(...).await                                                 │
//! │      print result or "error [CODE] message"                             │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::debug;

use crate::commands::customer::{self, CustomerDto};
use crate::commands::product::{self, ProductDto};
use crate::commands::sale::{self, DayBookResponse};
use crate::error::ApiError;
use crate::state::{ConfigState, LedgerState};

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddProduct,
    ReplenishStock,
    RegisterCustomer,
    RecordSale,
    Inventory,
    Customers,
    DayBook,
    PurgeSales,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 9] = [
        MenuAction::AddProduct,
        MenuAction::ReplenishStock,
        MenuAction::RegisterCustomer,
        MenuAction::RecordSale,
        MenuAction::Inventory,
        MenuAction::Customers,
        MenuAction::DayBook,
        MenuAction::PurgeSales,
        MenuAction::Quit,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MenuAction::AddProduct => "1",
            MenuAction::ReplenishStock => "2",
            MenuAction::RegisterCustomer => "3",
            MenuAction::RecordSale => "4",
            MenuAction::Inventory => "5",
            MenuAction::Customers => "6",
            MenuAction::DayBook => "7",
            MenuAction::PurgeSales => "8",
            MenuAction::Quit => "0",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::AddProduct => "Add or update product",
            MenuAction::ReplenishStock => "Replenish stock",
            MenuAction::RegisterCustomer => "Register customer",
            MenuAction::RecordSale => "Record sale",
            MenuAction::Inventory => "Inventory",
            MenuAction::Customers => "Customers",
            MenuAction::DayBook => "Day book",
            MenuAction::PurgeSales => "Purge day book",
            MenuAction::Quit => "Quit",
        }
    }

    pub fn parse(input: &str) -> Option<MenuAction> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            return Some(MenuAction::Quit);
        }
        MenuAction::ALL.into_iter().find(|a| a.key() == input)
    }
}

/// The interactive loop over any line source and sink.
pub struct Shell<R, W> {
    input: Lines<R>,
    output: W,
    ledger: LedgerState,
    config: ConfigState,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W, ledger: LedgerState, config: ConfigState) -> Self {
        Shell {
            input: input.lines(),
            output,
            ledger,
            config,
        }
    }

    /// Gives the sink back once the loop is done.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the operator quits or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu().await?;

            let Some(choice) = self.prompt("Choice").await? else {
                break;
            };

            let Some(action) = MenuAction::parse(&choice) else {
                self.write(&format!("Unknown option '{}'\n", choice.trim()))
                    .await?;
                continue;
            };

            debug!(?action, "Menu action selected");

            if action == MenuAction::Quit || !self.perform(action).await? {
                break;
            }
        }

        self.write("Goodbye.\n").await
    }

    /// Runs one action. Returns `false` if input ended mid-form.
    async fn perform(&mut self, action: MenuAction) -> io::Result<bool> {
        let outcome = match action {
            MenuAction::AddProduct => {
                let Some(f) = self.fields(&["Code", "Description", "Price"]).await? else {
                    return Ok(false);
                };
                product::add_product(&self.ledger, &f[0], &f[1], &f[2])
                    .await
                    .map(|p| {
                        format!(
                            "Saved {} ({}) at {}, stock {}\n",
                            p.code,
                            p.description,
                            self.config.format_currency(p.unit_price),
                            p.stock_quantity
                        )
                    })
            }
            MenuAction::ReplenishStock => {
                let Some(f) = self.fields(&["Code", "Quantity received"]).await? else {
                    return Ok(false);
                };
                product::replenish_stock(&self.ledger, &f[0], &f[1])
                    .await
                    .map(|p| format!("{} now has {} in stock\n", p.code, p.stock_quantity))
            }
            MenuAction::RegisterCustomer => {
                let Some(f) = self
                    .fields(&["Full name", "National id", "Address", "Phone"])
                    .await?
                else {
                    return Ok(false);
                };
                customer::register_customer(&self.ledger, &f[0], &f[1], &f[2], &f[3])
                    .await
                    .map(|c| format!("Registered {} ({})\n", c.full_name, c.national_id))
            }
            MenuAction::RecordSale => {
                self.show_sale_choices().await?;
                let Some(f) = self
                    .fields(&["Product code", "Quantity", "Customer id"])
                    .await?
                else {
                    return Ok(false);
                };
                self.confirm_sale_parties(&f[0], &f[2]).await?;
                sale::record_sale(&self.ledger, &f[0], &f[1], &f[2])
                    .await
                    .map(|r| {
                        format!(
                            "Sale #{} recorded: total {} at {}\n",
                            r.sale_id,
                            self.config.format_currency(r.total),
                            r.timestamp
                        )
                    })
            }
            MenuAction::Inventory => product::list_products(&self.ledger)
                .await
                .map(|p| render_products(&p, &self.config)),
            MenuAction::Customers => customer::list_customers(&self.ledger)
                .await
                .map(|c| render_customers(&c)),
            MenuAction::DayBook => sale::day_book(&self.ledger)
                .await
                .map(|b| render_day_book(&b, &self.config)),
            MenuAction::PurgeSales => {
                let Some(answer) = self
                    .prompt("Delete every sale in the day book? Type YES to confirm")
                    .await?
                else {
                    return Ok(false);
                };
                let confirmed = answer.trim().eq_ignore_ascii_case("yes");
                sale::purge_sales(&self.ledger, confirmed)
                    .await
                    .map(|r| format!("Purged {} sale(s)\n", r.deleted))
            }
            MenuAction::Quit => return Ok(true),
        };

        self.report(outcome).await?;
        Ok(true)
    }

    async fn report(&mut self, outcome: Result<String, ApiError>) -> io::Result<()> {
        match outcome {
            Ok(text) => self.write(&text).await,
            Err(err) => self.write(&format!("error {}\n", err)).await,
        }
    }

    /// Prints the catalog and the customer list above the sale form.
    async fn show_sale_choices(&mut self) -> io::Result<()> {
        let products = product::list_products(&self.ledger)
            .await
            .map(|p| render_products(&p, &self.config));
        self.report(products).await?;

        let customers = customer::list_customers(&self.ledger)
            .await
            .map(|c| render_customers(&c));
        self.report(customers).await
    }

    /// Echoes who buys what before the sale is recorded.
    ///
    /// Prints nothing when either lookup fails; `record_sale` reports
    /// the error in its own order.
    async fn confirm_sale_parties(&mut self, code: &str, customer_id: &str) -> io::Result<()> {
        let found_product = product::get_product(&self.ledger, code).await;
        let found_customer = customer::get_customer(&self.ledger, customer_id).await;

        if let (Ok(p), Ok(c)) = (found_product, found_customer) {
            let line = format!(
                "Selling {} ({}, {} each) to {}\n",
                p.code,
                p.description,
                self.config.format_currency(p.unit_price),
                c.full_name
            );
            self.write(&line).await?;
        } else {
            debug!(code = %code, customer = %customer_id, "Sale parties not confirmed");
        }
        Ok(())
    }

    async fn print_menu(&mut self) -> io::Result<()> {
        let mut menu = format!("\n== {} ==\n", self.config.store_name);
        for action in MenuAction::ALL {
            menu.push_str(&format!(" {}) {}\n", action.key(), action.label()));
        }
        self.write(&menu).await
    }

    /// Prompts for each label in turn. `None` if input ends first.
    async fn fields(&mut self, labels: &[&str]) -> io::Result<Option<Vec<String>>> {
        let mut values = Vec::with_capacity(labels.len());
        for label in labels {
            match self.prompt(label).await? {
                Some(value) => values.push(value),
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.write(&format!("{}: ", label)).await?;
        self.input.next_line().await
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn render_products(products: &[ProductDto], config: &ConfigState) -> String {
    if products.is_empty() {
        return "No products in the catalog\n".to_string();
    }

    let mut out = format!(
        "{:<12} {:<30} {:>12} {:>8}\n",
        "CODE", "DESCRIPTION", "PRICE", "STOCK"
    );
    for p in products {
        out.push_str(&format!(
            "{:<12} {:<30} {:>12} {:>8}\n",
            p.code,
            p.description,
            config.format_currency(p.unit_price),
            p.stock_quantity
        ));
    }
    out
}

fn render_customers(customers: &[CustomerDto]) -> String {
    if customers.is_empty() {
        return "No customers registered\n".to_string();
    }

    let mut out = format!(
        "{:<28} {:<12} {:<30} {:<14}\n",
        "NAME", "ID", "ADDRESS", "PHONE"
    );
    for c in customers {
        out.push_str(&format!(
            "{:<28} {:<12} {:<30} {:<14}\n",
            c.full_name, c.national_id, c.address, c.phone
        ));
    }
    out
}

fn render_day_book(book: &DayBookResponse, config: &ConfigState) -> String {
    let mut out = format!(
        "{:>6} {:<19} {:<12} {:<24} {:>5} {:>12} {:>12} {:<12}\n",
        "ID", "DATE", "CODE", "DESCRIPTION", "QTY", "PRICE", "TOTAL", "CUSTOMER"
    );
    for s in &book.sales {
        out.push_str(&format!(
            "{:>6} {:<19} {:<12} {:<24} {:>5} {:>12} {:>12} {:<12}\n",
            s.id,
            s.timestamp,
            s.product_code,
            s.description,
            s.quantity,
            config.format_currency(s.unit_price),
            config.format_currency(s.total),
            s.customer_id
        ));
    }
    out.push_str(&format!(
        "{} sale(s), total {}\n",
        book.sales.len(),
        config.format_currency(book.total)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_db::{DbConfig, Ledger};

    async fn run_script(script: &str) -> (String, LedgerState) {
        let ledger = LedgerState::new(Ledger::open(DbConfig::in_memory()).await.unwrap());
        let mut shell = Shell::new(
            script.as_bytes(),
            Vec::new(),
            ledger.clone(),
            ConfigState::default(),
        );
        shell.run().await.unwrap();
        let output = String::from_utf8(shell.into_output()).unwrap();
        (output, ledger)
    }

    #[test]
    fn test_menu_parse() {
        assert_eq!(MenuAction::parse(" 4 "), Some(MenuAction::RecordSale));
        assert_eq!(MenuAction::parse("Q"), Some(MenuAction::Quit));
        assert_eq!(MenuAction::parse("0"), Some(MenuAction::Quit));
        assert_eq!(MenuAction::parse("9"), None);
    }

    #[tokio::test]
    async fn test_full_day_script() {
        let script = "1\nA1\nWidget\n10.00\n\
                      2\nA1\n5\n\
                      3\nAna Torres\n1234567890\nCalle 5\n0991234567\n\
                      4\nA1\n3\n1234567890\n\
                      4\nA1\n6\n1234567890\n\
                      7\n\
                      0\n";
        let (output, ledger) = run_script(script).await;

        assert!(output.contains("Saved A1 (Widget) at $10.00, stock 0"));
        assert!(output.contains("A1 now has 5 in stock"));
        assert!(output.contains("Registered Ana Torres (1234567890)"));
        assert!(output.contains("Selling A1 (Widget, $10.00 each) to Ana Torres"));
        assert!(output.contains("total $30.00"));
        assert!(output.contains("error [INSUFFICIENT_STOCK]"));
        assert!(output.contains("1 sale(s), total $30.00"));
        assert!(output.ends_with("Goodbye.\n"));

        let stock = ledger
            .inner()
            .find_product("A1")
            .await
            .unwrap()
            .unwrap()
            .stock_quantity;
        assert_eq!(stock, 2);
    }

    #[tokio::test]
    async fn test_sale_form_lists_products_and_customers() {
        let script = "1\nA1\nWidget\n10.00\n\
                      3\nAna Torres\n1234567890\nCalle 5\n0991234567\n\
                      4\nZZ\n1\n1234567890\n";
        let (output, ledger) = run_script(script).await;

        // Only the sale form prints the catalog in this script
        let sale_form = &output[output.find("CODE").unwrap()..];
        let listing = &sale_form[..sale_form.find("Product code: ").unwrap()];

        assert!(listing.contains("A1"));
        assert!(listing.contains("Widget"));
        assert!(listing.contains("$10.00"));
        assert!(listing.contains("NAME"));
        assert!(listing.contains("Ana Torres"));
        assert!(listing.contains("1234567890"));

        // Unknown code: no echo, the sale reports it
        assert!(!output.contains("Selling"));
        assert!(output.contains("error [NOT_FOUND] Product not found: ZZ"));
        assert!(ledger.inner().list_sales().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_purge_needs_yes() {
        let script = "1\nA1\nWidget\n1.00\n\
                      2\nA1\n2\n\
                      3\nAna\n1234567890\nCalle 5\n0991\n\
                      4\nA1\n1\n1234567890\n\
                      8\nno\n\
                      8\nyes\n";
        let (output, ledger) = run_script(script).await;

        assert!(output.contains("error [VALIDATION_ERROR] Purge not confirmed"));
        assert!(output.contains("Purged 1 sale(s)"));
        assert!(ledger.inner().list_sales().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_input_ending_mid_form_stops_cleanly() {
        let (output, ledger) = run_script("x\n1\nA1\n").await;

        assert!(output.contains("Unknown option 'x'"));
        assert!(output.ends_with("Goodbye.\n"));
        assert!(ledger.inner().list_products().await.unwrap().is_empty());
    }

    #[test]
    fn test_render_empty_lists() {
        let config = ConfigState::default();
        assert_eq!(render_products(&[], &config), "No products in the catalog\n");
        assert_eq!(render_customers(&[]), "No customers registered\n");

        let book = DayBookResponse {
            sales: Vec::new(),
            total: till_core::Money::zero(),
        };
        assert!(render_day_book(&book, &config).ends_with("0 sale(s), total $0.00\n"));
    }
}
