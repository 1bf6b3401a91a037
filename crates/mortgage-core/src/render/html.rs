use minijinja::Environment;
use serde::Serialize;

use crate::render::currency::CurrencyFormat;
use crate::types::{Money, MortgageReport, PaymentSource};
use crate::MortgageResult;

const INDEX_TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Raw form values echoed back into the page so the user can adjust and
/// resubmit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormValues {
    pub principal: String,
    pub rate: String,
    pub months: String,
    pub monthly: String,
}

/// Compiled page template plus the currency format used for every amount.
///
/// Build once at startup and share; rendering only reads from it.
pub struct HtmlRenderer {
    env: Environment<'static>,
    currency: CurrencyFormat,
}

#[derive(Serialize)]
struct PageView<'a> {
    form: &'a FormValues,
    error: Option<&'a str>,
    result: Option<ResultView>,
}

#[derive(Serialize)]
struct ResultView {
    principal: String,
    annual_rate: String,
    fixed_months: u32,
    monthly_payment: String,
    payment_source: &'static str,
    total_paid: String,
    total_interest: String,
    total_principal: String,
    remaining_balance: String,
    rows: Vec<RowView>,
}

#[derive(Serialize)]
struct RowView {
    month: u32,
    interest: String,
    principal: String,
    balance: String,
}

impl HtmlRenderer {
    pub fn new(currency: CurrencyFormat) -> MortgageResult<Self> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
        Ok(Self { env, currency })
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    /// The input form alone, optionally with an error banner.
    pub fn render_form(&self, form: &FormValues, error: Option<&str>) -> MortgageResult<String> {
        self.render(&PageView {
            form,
            error,
            result: None,
        })
    }

    /// The input form followed by the summary and the schedule table.
    pub fn render_report(
        &self,
        form: &FormValues,
        report: &MortgageReport,
    ) -> MortgageResult<String> {
        self.render(&PageView {
            form,
            error: None,
            result: Some(self.result_view(report)),
        })
    }

    fn render(&self, view: &PageView<'_>) -> MortgageResult<String> {
        let template = self.env.get_template(INDEX_TEMPLATE_NAME)?;
        Ok(template.render(view)?)
    }

    fn result_view(&self, report: &MortgageReport) -> ResultView {
        let money = |amount: Money| self.currency.format(amount);
        let terms = &report.terms;
        let summary = &report.summary;

        ResultView {
            principal: money(terms.principal()),
            annual_rate: format!("{}%", terms.annual_rate_pct().normalize()),
            fixed_months: terms.fixed_months(),
            monthly_payment: money(terms.monthly_payment()),
            payment_source: match terms.payment_source() {
                PaymentSource::Computed => "computed",
                PaymentSource::Supplied => "supplied",
            },
            total_paid: money(summary.total_paid),
            total_interest: money(summary.total_interest),
            total_principal: money(summary.total_principal),
            remaining_balance: money(summary.remaining_balance),
            rows: report
                .schedule
                .entries()
                .iter()
                .map(|e| RowView {
                    month: e.month,
                    interest: money(e.interest),
                    principal: money(e.principal),
                    balance: money(e.balance),
                })
                .collect(),
        }
    }
}
