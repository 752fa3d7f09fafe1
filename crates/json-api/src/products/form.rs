//! Product form parsing
//!
//! Admin screens submit products as multipart forms: plain text fields, an optional image
//! file and the variation categories as a JSON string.

use std::str::FromStr;

use rust_decimal::Decimal;
use salvo::{http::form::FilePart, prelude::*};
use serde::de::DeserializeOwned;

use bakehouse_app::{domain::products::data::ProductDetails, storage::ImageUpload};

use crate::extensions::*;

/// A submitted product form.
#[derive(Debug)]
pub(super) struct ProductForm {
    pub details: ProductDetails,
    pub image: Option<ImageUpload>,
}

pub(super) async fn read(req: &mut Request) -> Result<ProductForm, StatusError> {
    let form = req.form_data().await.or_400("Expected a form body")?;

    let details = details_from_fields(|name| form.fields.get(name).map(String::as_str))?;

    let image = match form.files.get("image") {
        Some(file) => read_image(file).await?,
        None => None,
    };

    Ok(ProductForm { details, image })
}

/// Build product details from form fields; required fields are checked by the service.
pub(super) fn details_from_fields<'a>(
    field: impl Fn(&str) -> Option<&'a str>,
) -> Result<ProductDetails, StatusError> {
    let text = |name: &str| field(name).unwrap_or_default().to_string();
    let present = |name: &str| field(name).map(str::trim).filter(|value| !value.is_empty());

    let price = present("price")
        .map(Decimal::from_str)
        .transpose()
        .or_400("Invalid price")?;

    let sale = present("sale")
        .map(Decimal::from_str)
        .transpose()
        .or_400("Invalid sale price")?;

    Ok(ProductDetails {
        title: text("title"),
        description: text("description"),
        category: text("category"),
        price,
        sale,
        variation_categories: json_field(present("variationCategories"), "Invalid variation categories")?,
        types: json_field(present("types"), "Invalid product types")?,
    })
}

fn json_field<T: DeserializeOwned + Default>(
    value: Option<&str>,
    brief: &str,
) -> Result<T, StatusError> {
    value
        .map(serde_json::from_str::<T>)
        .transpose()
        .or_400(brief)
        .map(Option::unwrap_or_default)
}

/// Browsers send an empty, unnamed part when no file was chosen.
async fn read_image(file: &FilePart) -> Result<Option<ImageUpload>, StatusError> {
    let Some(file_name) = file.name().filter(|name| !name.is_empty()) else {
        return Ok(None);
    };

    if file.size() == 0 {
        return Ok(None);
    }

    let bytes = tokio::fs::read(file.path())
        .await
        .or_500("failed to read uploaded image")?;

    Ok(Some(ImageUpload::from_file_name(
        file_name,
        file.content_type().map(|mime| mime.to_string()),
        bytes,
    )))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bakehouse::products::{VariationCategory, VariationOption};
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    fn parse(fields: &[(&str, &str)]) -> Result<ProductDetails, StatusError> {
        let fields: HashMap<&str, &str> = fields.iter().copied().collect();

        details_from_fields(|name| fields.get(name).copied())
    }

    #[test]
    fn parses_text_and_prices() -> TestResult {
        let details = parse(&[
            ("title", "Brownie"),
            ("description", "Fudgy"),
            ("category", "Bakes"),
            ("price", " 6.50 "),
            ("sale", ""),
        ])?;

        assert_eq!(details.title, "Brownie");
        assert_eq!(details.price, Some(dec!(6.50)));
        assert_eq!(details.sale, None);
        assert!(details.variation_categories.is_empty());

        Ok(())
    }

    #[test]
    fn parses_variation_categories_json() -> TestResult {
        let details = parse(&[(
            "variationCategories",
            r#"[{"name":"Size","options":[{"label":"Large","price":15}]}]"#,
        )])?;

        assert_eq!(
            details.variation_categories,
            [VariationCategory::new("Size", [VariationOption::new("Large", dec!(15))])]
        );

        Ok(())
    }

    #[test]
    fn rejects_malformed_numbers_and_json() {
        assert!(parse(&[("price", "six")]).is_err());
        assert!(parse(&[("variationCategories", "{not json")]).is_err());
    }
}
