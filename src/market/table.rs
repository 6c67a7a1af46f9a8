//! Locate the price table in rendered portal markup and extract its rows.
//!
//! The portal renders several layout tables around the one that carries
//! data; the data table is recognised by a header cell reading exactly
//! "Modal Price". Every matching table contributes rows, in table order
//! then row order.

use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};

use crate::market::{PriceRecord, PRICE_UNIT};

/// Header cell text that marks the data table.
const PRICE_HEADER: &str = "Modal Price";

/// Data rows carry at least this many cells; shorter rows are grouping
/// or footer rows and are skipped.
const MIN_ROW_CELLS: usize = 6;

/// Extract price records from a rendered search-results page.
///
/// Returns an empty vector when no table carries the modal-price header.
/// A non-empty price cell that does not parse as a number is an error.
pub fn extract_prices(html: &str) -> Result<Vec<PriceRecord>> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").unwrap();
    let th_sel = Selector::parse("th").unwrap();
    let tr_sel = Selector::parse("tr").unwrap();
    let td_sel = Selector::parse("td").unwrap();

    let mut prices = Vec::new();
    for table in document.select(&table_sel) {
        let is_price_table = table.select(&th_sel).any(|th| cell_text(th) == PRICE_HEADER);
        if !is_price_table {
            continue;
        }

        // First row is the header row.
        for row in table.select(&tr_sel).skip(1) {
            let cells: Vec<String> = row.select(&td_sel).map(cell_text).collect();
            if cells.len() < MIN_ROW_CELLS {
                continue;
            }
            prices.push(PriceRecord {
                mandi: cells[1].clone(),
                price: parse_price(&cells[5])
                    .with_context(|| format!("malformed price cell {:?}", cells[5]))?,
                unit: PRICE_UNIT.to_string(),
                date: cells[3].clone(),
            });
        }
    }
    Ok(prices)
}

fn cell_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Parse a locale-formatted price. Thousands separators are stripped;
/// an empty cell means the portal rendered no quote and counts as zero.
fn parse_price(raw: &str) -> Result<f64, std::num::ParseFloatError> {
    let cleaned = raw.replace(',', "");
    if cleaned.is_empty() {
        Ok(0.0)
    } else {
        cleaned.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
    <html><body>
    <table><tr><td>navigation chrome</td></tr></table>
    <table>
        <tr>
            <th>Sl No</th><th> Market </th><th>Commodity</th>
            <th>Date</th><th>Min Price</th><th>Modal Price</th>
        </tr>
        <tr>
            <td>1</td><td> Khanna </td><td>Wheat</td>
            <td> 01 Aug 2026 </td><td>2,100</td><td>2,250.50</td>
        </tr>
        <tr>
            <td>2</td><td>Ludhiana</td><td>Wheat</td>
            <td>01 Aug 2026</td><td>2,000</td><td></td>
        </tr>
        <tr><td colspan="3">No more rows</td></tr>
    </table>
    </body></html>
    "#;

    #[test]
    fn test_extracts_rows_from_price_table() {
        let prices = extract_prices(RESULTS_PAGE).unwrap();
        assert_eq!(prices.len(), 2);

        assert_eq!(prices[0].mandi, "Khanna");
        assert_eq!(prices[0].price, 2250.5);
        assert_eq!(prices[0].unit, "quintal");
        assert_eq!(prices[0].date, "01 Aug 2026");
    }

    #[test]
    fn test_empty_price_cell_counts_as_zero() {
        let prices = extract_prices(RESULTS_PAGE).unwrap();
        assert_eq!(prices[1].mandi, "Ludhiana");
        assert_eq!(prices[1].price, 0.0);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let prices = extract_prices(RESULTS_PAGE).unwrap();
        assert!(prices.iter().all(|p| p.mandi != "No more rows"));
    }

    #[test]
    fn test_no_price_table_yields_empty() {
        let html = r#"
        <html><body>
        <table><tr><th>Weather</th></tr><tr>
            <td>a</td><td>b</td><td>c</td><td>d</td><td>e</td><td>f</td>
        </tr></table>
        </body></html>
        "#;
        let prices = extract_prices(html).unwrap();
        assert!(prices.is_empty());
    }

    #[test]
    fn test_every_matching_table_contributes_rows() {
        let table = r#"
        <table>
            <tr><th>A</th><th>Modal Price</th></tr>
            <tr><td>1</td><td>M1</td><td>W</td><td>D1</td><td>x</td><td>10</td></tr>
        </table>
        "#;
        let html = format!("<html><body>{table}{table}</body></html>");
        let prices = extract_prices(&html).unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].mandi, "M1");
        assert_eq!(prices[1].mandi, "M1");
    }

    #[test]
    fn test_malformed_price_is_an_error() {
        let html = r#"
        <table>
            <tr><th>Modal Price</th></tr>
            <tr><td>1</td><td>M</td><td>W</td><td>D</td><td>x</td><td>NR</td></tr>
        </table>
        "#;
        let err = extract_prices(html).unwrap_err();
        assert!(format!("{err:#}").contains("malformed price cell"));
    }

    #[test]
    fn test_parse_price_strips_thousands_separators() {
        assert_eq!(parse_price("1,234.50").unwrap(), 1234.5);
        assert_eq!(parse_price("").unwrap(), 0.0);
        assert_eq!(parse_price("2250").unwrap(), 2250.0);
    }
}
