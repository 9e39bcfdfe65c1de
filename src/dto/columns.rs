//! Column definitions for each admin table.

use chrono::{DateTime, NaiveDateTime};

use crate::domain::category::Category;
use crate::domain::content::Content;
use crate::domain::hierarchy::HierarchySubCategory;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::product::Product;
use crate::domain::promo_code::PromoCode;
use crate::domain::user::UserAccount;
use crate::dto::tables::{HIERARCHY_CATEGORY_KEY, HIERARCHY_MAIN_KEY, HIERARCHY_SUB_KEY};
use crate::table::{CellValue, Column, QueryPatch};

/// Renders an API timestamp as `YYYY-MM-DD HH:MM`, falling back to the raw
/// text when it cannot be parsed.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

pub fn products() -> Vec<Column<Product>> {
    vec![
        Column::new("id", "ID", |p: &Product| p.id.as_str().into()),
        Column::new("name", "Name", |p: &Product| p.name.as_str().into()),
        Column::new("price", "Price", |p: &Product| p.pricing.price.into())
            .display(|p| format!("{:.2}", p.pricing.price)),
        Column::new("gender", "Gender", |p: &Product| p.gender.name.as_str().into()),
        Column::new("category", "Category", |p: &Product| {
            p.category.name.as_str().into()
        }),
        Column::new("mainCategory", "Main Category", |p: &Product| {
            p.main_category.name.as_str().into()
        }),
        Column::new("variationCount", "Variation Count", |p: &Product| {
            CellValue::Integer(p.variations.len() as i64)
        }),
    ]
}

pub fn orders() -> Vec<Column<Order>> {
    vec![
        Column::new("orderId", "ID", |o: &Order| o.order_id.as_str().into()),
        Column::new("userEmail", "User Email", |o: &Order| o.user_email.as_str().into()),
        Column::new("orderDate", "Date", |o: &Order| o.order_date.as_str().into())
            .display(|o| format_timestamp(&o.order_date)),
        Column::new("totalAmount", "Total Amount", |o: &Order| o.total_amount.into())
            .display(|o| format!("${:.2}", o.total_amount)),
        Column::new("statusName", "Status", |o: &Order| o.status_name.as_str().into())
            .tone(|o| Some(OrderStatus::tone_for(&o.status_name))),
        Column::new("itemsCount", "Items Count", |o: &Order| o.items_count.into()),
    ]
}

pub fn users() -> Vec<Column<UserAccount>> {
    vec![
        Column::new("id", "ID", |u: &UserAccount| u.user_id.as_str().into()),
        Column::new("email", "Email", |u: &UserAccount| u.email.as_str().into()),
        Column::new("role", "Role", |u: &UserAccount| u.role.as_str().into()),
        Column::new("status", "Status", |u: &UserAccount| u.status.as_str().into())
            .tone(|u| Some(u.status_tone())),
    ]
}

pub fn contents() -> Vec<Column<Content>> {
    vec![
        Column::new("name", "Name", |c: &Content| c.name.as_str().into()),
        Column::new("title", "Title", |c: &Content| c.title.as_str().into()),
    ]
}

pub fn promo_codes() -> Vec<Column<PromoCode>> {
    vec![
        Column::new("promoCodeId", "ID", |p: &PromoCode| p.promo_code_id.as_str().into()),
        Column::new("discount", "Discount", |p: &PromoCode| p.discount.into())
            .display(|p| format!("{}%", p.discount)),
        Column::new("startDate", "Start Date", |p: &PromoCode| p.start_date.as_str().into())
            .display(|p| format_timestamp(&p.start_date))
            .unsearchable(),
        Column::new("endDate", "End Date", |p: &PromoCode| p.end_date.as_str().into())
            .display(|p| format_timestamp(&p.end_date))
            .unsearchable(),
        Column::new("used", "Used", |p: &PromoCode| p.times_used.into()),
        Column::new("status", "Status", |p: &PromoCode| p.status.into())
            .display(|p| (if p.status { "Active" } else { "Inactive" }).to_string())
            .tone(|p| Some(if p.status { "success" } else { "warning" }))
            .unsearchable(),
    ]
}

pub fn categories() -> Vec<Column<Category>> {
    vec![
        Column::new("id", "ID", |c: &Category| c.id.into()),
        Column::new("name", "Name", |c: &Category| c.name.as_str().into()),
    ]
}

/// Main categories of the hierarchy screen; names open their categories.
pub fn hierarchy_main_categories() -> Vec<Column<Category>> {
    vec![
        Column::new("id", "ID", |c: &Category| c.id.into()),
        Column::new("name", "Name", |c: &Category| c.name.as_str().into()).link(|c| {
            Some(
                QueryPatch::new()
                    .page(1)
                    .set_filter(HIERARCHY_MAIN_KEY, c.id.to_string())
                    .remove_filter(HIERARCHY_CATEGORY_KEY)
                    .remove_filter(HIERARCHY_SUB_KEY),
            )
        }),
    ]
}

/// Categories of one main category; names open their sub-categories.
pub fn hierarchy_categories() -> Vec<Column<Category>> {
    vec![
        Column::new("id", "ID", |c: &Category| c.id.into()),
        Column::new("name", "Name", |c: &Category| c.name.as_str().into()).link(|c| {
            Some(
                QueryPatch::new()
                    .page(1)
                    .set_filter(HIERARCHY_CATEGORY_KEY, c.id.to_string())
                    .remove_filter(HIERARCHY_SUB_KEY),
            )
        }),
    ]
}

pub fn hierarchy_sub_categories() -> Vec<Column<HierarchySubCategory>> {
    vec![
        Column::new("id", "ID", |s: &HierarchySubCategory| s.id.into()),
        Column::new("hierarchyId", "Hierarchy ID", |s: &HierarchySubCategory| {
            s.hierarchy_id.into()
        }),
        Column::new("status", "Status", |s: &HierarchySubCategory| s.status.into())
            .display(|s| (if s.status { "Active" } else { "Inactive" }).to_string())
            .tone(|s| Some(if s.status { "success" } else { "warning" }))
            .unsearchable(),
        Column::new("name", "Name", |s: &HierarchySubCategory| s.name.as_str().into()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_shortened_when_parseable() {
        assert_eq!(format_timestamp("2024-05-01T10:30:00Z"), "2024-05-01 10:30");
        assert_eq!(
            format_timestamp("2024-05-01T10:30:15.123"),
            "2024-05-01 10:30"
        );
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn order_amount_and_status_render_for_display() {
        let order = Order {
            total_amount: 12.5,
            status_name: "Cancelled".to_string(),
            ..Order::default()
        };
        let columns = orders();

        assert_eq!(columns[3].text_of(&order), "$12.50");
        assert_eq!(columns[4].tone_of(&order), Some("danger"));
    }

    #[test]
    fn promo_status_text_is_not_matched_by_search() {
        let code = PromoCode {
            status: true,
            ..PromoCode::default()
        };
        let status = &promo_codes()[5];

        assert_eq!(status.text_of(&code), "Active");
        assert!(!status.is_searchable());
    }

    #[test]
    fn main_category_link_clears_deeper_selections() {
        let main = Category {
            id: 3,
            name: "Women".to_string(),
        };
        let patch = hierarchy_main_categories()[1].link_of(&main).unwrap();

        assert_eq!(patch.page, Some(1));
        assert_eq!(
            patch.filters,
            vec![
                ("main-category".to_string(), Some("3".to_string())),
                ("category".to_string(), None),
                ("sub-category".to_string(), None),
            ]
        );
        assert!(hierarchy_main_categories()[0].link_of(&main).is_none());
    }
}
