use crate::application::read_models::{CourseListing, StockView};
use crate::course_catalog::domain::{Category, CourseTemplate};
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;
use serde_json::Value;

const COURSE_TABLE_HEADER: &str = "| Bvin | SKU | Name | Start | Price |";
const COURSE_TABLE_SEPARATOR: &str = "|------|-----|------|-------|-------|";
const STOCK_COLUMN_HEADER: &str = " Stock |";
const STOCK_COLUMN_SEPARATOR: &str = "-------|";

const TEMPLATE_TABLE_HEADER: &str = "| Template ID | Name | Base SKU | Hours | Price |\n";
const TEMPLATE_TABLE_SEPARATOR: &str = "|-------------|------|----------|-------|-------|\n";

const CATEGORY_TABLE_HEADER: &str = "| Bvin | Name |\n";
const CATEGORY_TABLE_SEPARATOR: &str = "|------|------|\n";

/// MarkdownFormatter adapter: tables for listings, fenced JSON for documents
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn number_cell(value: Option<f64>) -> String {
        value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
    }

    fn stock_cell(stock: Option<&StockView>) -> String {
        match stock {
            Some(StockView {
                error: Some(error), ..
            }) => format!("⚠️ {}", Self::escape_markdown_table_cell(error)),
            Some(StockView {
                quantity_on_hand: Some(quantity),
                warnings,
                ..
            }) if !warnings.is_empty() => format!(
                "{} ⚠️ {}",
                quantity,
                Self::escape_markdown_table_cell(&warnings.join("; "))
            ),
            Some(StockView {
                quantity_on_hand: Some(quantity),
                ..
            }) => quantity.to_string(),
            _ => "N/A".to_string(),
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for MarkdownFormatter {
    fn format_courses(&self, courses: &[CourseListing]) -> Result<String> {
        let with_stock = courses.iter().any(|course| course.stock.is_some());
        let mut output = String::from("# Courses\n\n");
        if courses.is_empty() {
            output.push_str("No courses found in the default category.\n");
            return Ok(output);
        }

        output.push_str(COURSE_TABLE_HEADER);
        if with_stock {
            output.push_str(STOCK_COLUMN_HEADER);
        }
        output.push('\n');
        output.push_str(COURSE_TABLE_SEPARATOR);
        if with_stock {
            output.push_str(STOCK_COLUMN_SEPARATOR);
        }
        output.push('\n');

        for course in courses {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |",
                Self::escape_markdown_table_cell(&course.bvin),
                Self::escape_markdown_table_cell(&course.sku),
                Self::escape_markdown_table_cell(&course.name),
                course.schedule.as_deref().unwrap_or("unknown"),
                Self::number_cell(course.price),
            ));
            if with_stock {
                output.push_str(&format!(" {} |", Self::stock_cell(course.stock.as_ref())));
            }
            output.push('\n');
        }
        Ok(output)
    }

    fn format_templates(&self, templates: &[CourseTemplate]) -> Result<String> {
        let mut output = String::from("# Course Templates\n\n");
        output.push_str(TEMPLATE_TABLE_HEADER);
        output.push_str(TEMPLATE_TABLE_SEPARATOR);
        for template in templates {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&template.template_id),
                Self::escape_markdown_table_cell(&template.name),
                Self::escape_markdown_table_cell(template.base_sku.as_deref().unwrap_or("")),
                Self::number_cell(template.duration_hours),
                Self::number_cell(template.default_price),
            ));
        }
        Ok(output)
    }

    fn format_categories(&self, categories: &[Category]) -> Result<String> {
        let mut output = String::from("# Categories\n\n");
        output.push_str(CATEGORY_TABLE_HEADER);
        output.push_str(CATEGORY_TABLE_SEPARATOR);
        for category in categories {
            output.push_str(&format!(
                "| {} | {} |\n",
                Self::escape_markdown_table_cell(&category.bvin),
                Self::escape_markdown_table_cell(&category.name),
            ));
        }
        Ok(output)
    }

    fn format_document(&self, document: &Value) -> Result<String> {
        Ok(format!(
            "```json\n{}\n```\n",
            serde_json::to_string_pretty(document)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn course(stock: Option<StockView>) -> CourseListing {
        CourseListing {
            bvin: "p-1".to_string(),
            sku: "BREW-202401011000".to_string(),
            name: "Beer | Brewing".to_string(),
            price: Some(12000.0),
            schedule: Some("2024-01-01 10:00".to_string()),
            stock,
        }
    }

    #[test]
    fn test_course_table_escapes_cells() {
        let output = MarkdownFormatter::new()
            .format_courses(&[course(None)])
            .unwrap();
        assert!(output.contains(COURSE_TABLE_HEADER));
        assert!(output.contains("| p-1 | BREW-202401011000 | Beer \\| Brewing | 2024-01-01 10:00 | 12000 |"));
        assert!(!output.contains("Stock"));
    }

    #[test]
    fn test_course_table_with_stock_column() {
        let output = MarkdownFormatter::new()
            .format_courses(&[
                course(Some(StockView::known("inv-1", Some(9)))),
                course(Some(StockView::failed("No inventory record found"))),
            ])
            .unwrap();
        assert!(output.contains("| Price | Stock |"));
        assert!(output.contains("| 12000 | 9 |"));
        assert!(output.contains("⚠️ No inventory record found"));
    }

    #[test]
    fn test_empty_course_list() {
        let output = MarkdownFormatter::new().format_courses(&[]).unwrap();
        assert!(output.contains("No courses found"));
    }

    #[test]
    fn test_template_table() {
        let output = MarkdownFormatter::new()
            .format_templates(&[CourseTemplate::example()])
            .unwrap();
        assert!(output.contains("| TPL-EXAMPLE-1H | Example Template (1h) | TPL-EX-1H | 1 | 10000 |"));
    }

    #[test]
    fn test_document_is_fenced() {
        let output = MarkdownFormatter::new()
            .format_document(&json!({"Bvin": "inv-1"}))
            .unwrap();
        assert!(output.starts_with("```json\n"));
        assert!(output.ends_with("\n```\n"));
    }
}
