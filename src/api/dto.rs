//! Request bodies and the validation that turns them into domain values.
//!
//! Request DTOs are lenient (`Option` fields, loosely typed numbers) so that
//! missing or empty values reach validation and produce the API's own
//! messages instead of a parser error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ValidationError;
use crate::domain::{
    CompositionEntry, ContactChanges, DailyRecord, DocumentId, Email, EmailKind, IngredientChanges,
    Phone, PhoneKind, RecipeChanges, Record, Timestamp, Transaction, TransactionKind,
    TransactionPatch,
};

// =============================================================================
// Messages
// =============================================================================

pub const NAME_REQUIRED: &str = "El nombre es obligatorio";
pub const VALUE_REQUIRED: &str = "El valor es obligatorio";
pub const VALUE_NOT_NUMERIC: &str = "El valor debe ser numérico";
pub const WEIGHT_REQUIRED: &str = "El peso en gramos es obligatorio";
pub const WEIGHT_NOT_NUMERIC: &str = "El peso en gramos debe ser numérico";
pub const SERVINGS_NOT_NUMERIC: &str = "Las raciones deben ser numéricas";
pub const INVALID_INGREDIENT_ID: &str = "ID de ingrediente inválido";

// =============================================================================
// Shared Validation
// =============================================================================

/// Parses a path identity, failing with `message` when it is malformed.
///
/// # Errors
///
/// Returns a [`ValidationError`] carrying `message`.
pub fn parse_identity(raw: &str, message: &str) -> Result<DocumentId, ValidationError> {
    DocumentId::parse(raw).map_err(|_| ValidationError::new(message))
}

/// Trims a required name.
///
/// # Errors
///
/// Returns [`NAME_REQUIRED`] if the name is absent or blank.
pub fn validate_name(name: Option<&str>) -> Result<String, ValidationError> {
    name.map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ValidationError::new(NAME_REQUIRED))
}

/// Trims an optional text field, defaulting to empty.
fn trimmed_or_empty(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Reads a required, truthy amount from a JSON number or numeric string.
///
/// `null`, `0`, `""` and `false` count as missing. A non-empty string must
/// parse as a number.
///
/// # Errors
///
/// Returns `missing` for absent or falsy values and `not_numeric` for values
/// that cannot be read as a number.
pub fn required_amount(
    value: Option<&Value>,
    missing: &str,
    not_numeric: &str,
) -> Result<f64, ValidationError> {
    let missing_error = || ValidationError::new(missing);
    let not_numeric_error = || ValidationError::new(not_numeric);

    match value {
        None | Some(Value::Null | Value::Bool(false)) => Err(missing_error()),
        Some(Value::Number(number)) => match number.as_f64() {
            Some(amount) if amount != 0.0 => Ok(amount),
            Some(_) => Err(missing_error()),
            None => Err(not_numeric_error()),
        },
        Some(Value::String(text)) if text.is_empty() => Err(missing_error()),
        Some(Value::String(text)) => parse_numeric(text).ok_or_else(not_numeric_error),
        Some(_) => Err(not_numeric_error()),
    }
}

/// Reads an optional amount from a JSON number, numeric string or boolean.
///
/// Absent, `null` and blank values read as `0`.
///
/// # Errors
///
/// Returns `not_numeric` for values that cannot be read as a number.
pub fn optional_amount(value: Option<&Value>, not_numeric: &str) -> Result<f64, ValidationError> {
    let not_numeric_error = || ValidationError::new(not_numeric);

    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Bool(flag)) => Ok(f64::from(u8::from(*flag))),
        Some(Value::Number(number)) => number.as_f64().ok_or_else(not_numeric_error),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(0.0),
        Some(Value::String(text)) => parse_numeric(text).ok_or_else(not_numeric_error),
        Some(_) => Err(not_numeric_error()),
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Issues the identities of one list of embedded children.
///
/// A well-formed client `_id` is kept unless an earlier child of the same
/// list already holds it; malformed and repeated ones are replaced.
#[derive(Debug, Default)]
struct ChildIdentities {
    issued: HashSet<DocumentId>,
}

impl ChildIdentities {
    fn next(&mut self, supplied: Option<&str>) -> DocumentId {
        let mut identity = supplied
            .and_then(|raw| DocumentId::parse(raw).ok())
            .unwrap_or_else(DocumentId::generate);
        while !self.issued.insert(identity) {
            identity = DocumentId::generate();
        }
        identity
    }
}

// =============================================================================
// Ledger DTOs
// =============================================================================

/// Transaction as sent inside a record body.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionInput {
    #[serde(rename = "_id", default)]
    pub transaction_id: Option<String>,
    pub date: Timestamp,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "tipo")]
    pub kind: TransactionKind,
}

impl TransactionInput {
    fn into_transaction(self, identities: &mut ChildIdentities) -> Transaction {
        Transaction {
            transaction_id: identities.next(self.transaction_id.as_deref()),
            date: self.date,
            name: self.name,
            amount: self.amount,
            kind: self.kind,
        }
    }
}

/// Request body for `POST /api/records`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecordRequest {
    pub date: Timestamp,
    #[serde(rename = "transacciones", default)]
    pub transactions: Option<Vec<TransactionInput>>,
}

impl CreateRecordRequest {
    /// Builds the record to persist under `record_id`.
    #[must_use]
    pub fn into_record(self, record_id: DocumentId) -> Record {
        let mut identities = ChildIdentities::default();
        Record::new(
            record_id,
            self.date,
            self.transactions
                .unwrap_or_default()
                .into_iter()
                .map(|transaction| transaction.into_transaction(&mut identities))
                .collect(),
        )
    }
}

/// Request body for `PUT /api/transactions/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTransactionRequest {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "monto", default)]
    pub amount: Option<f64>,
    #[serde(rename = "tipo", default)]
    pub kind: Option<TransactionKind>,
}

impl From<UpdateTransactionRequest> for TransactionPatch {
    fn from(request: UpdateTransactionRequest) -> Self {
        Self {
            name: request.name,
            amount: request.amount,
            kind: request.kind,
        }
    }
}

/// Request body for `POST /api/daily-records`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDailyRecordRequest {
    pub date: Timestamp,
    #[serde(rename = "ingreso")]
    pub income: f64,
    #[serde(rename = "gasto")]
    pub expense: f64,
    pub balance: f64,
    #[serde(rename = "nombreIngreso", default)]
    pub income_label: Option<String>,
    #[serde(rename = "nombreGasto", default)]
    pub expense_label: Option<String>,
}

impl CreateDailyRecordRequest {
    #[must_use]
    pub fn into_daily_record(self, daily_record_id: DocumentId) -> DailyRecord {
        DailyRecord {
            daily_record_id,
            date: self.date,
            income: self.income,
            expense: self.expense,
            balance: self.balance,
            income_label: self.income_label,
            expense_label: self.expense_label,
        }
    }
}

// =============================================================================
// Contact DTOs
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PhoneInput {
    #[serde(rename = "_id", default)]
    pub phone_id: Option<String>,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "tipo", default)]
    pub kind: Option<PhoneKind>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailInput {
    #[serde(rename = "_id", default)]
    pub email_id: Option<String>,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "tipo", default)]
    pub kind: Option<EmailKind>,
}

/// Request body for creating or replacing a contact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "empresa", default)]
    pub company: Option<String>,
    #[serde(rename = "telefonos", default)]
    pub phones: Option<Vec<PhoneInput>>,
    #[serde(default)]
    pub emails: Option<Vec<EmailInput>>,
}

impl ContactRequest {
    /// Validates the request into replacement values for a contact.
    ///
    /// # Errors
    ///
    /// Returns [`NAME_REQUIRED`] if the name is absent or blank.
    pub fn validate(self) -> Result<ContactChanges, ValidationError> {
        let name = validate_name(self.name.as_deref())?;
        let mut phone_ids = ChildIdentities::default();
        let mut email_ids = ChildIdentities::default();

        Ok(ContactChanges {
            name,
            company: trimmed_or_empty(self.company.as_deref()),
            phones: self
                .phones
                .unwrap_or_default()
                .into_iter()
                .map(|phone| Phone {
                    phone_id: phone_ids.next(phone.phone_id.as_deref()),
                    number: phone.number,
                    kind: phone.kind.unwrap_or_default(),
                })
                .collect(),
            emails: self
                .emails
                .unwrap_or_default()
                .into_iter()
                .map(|email| Email {
                    email_id: email_ids.next(email.email_id.as_deref()),
                    address: email.address,
                    kind: email.kind.unwrap_or_default(),
                })
                .collect(),
        })
    }
}

// =============================================================================
// Ingredient DTOs
// =============================================================================

/// Request body for creating or replacing an ingredient.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientRequest {
    #[serde(rename = "proveedor", default)]
    pub supplier: Option<String>,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "valor", default)]
    pub unit_cost: Option<Value>,
    #[serde(rename = "gr", default)]
    pub weight_grams: Option<Value>,
}

impl IngredientRequest {
    /// Validates the request into replacement values for an ingredient.
    ///
    /// Checks run in order: name, value, weight.
    ///
    /// # Errors
    ///
    /// Returns the message of the first failing field.
    pub fn validate(self) -> Result<IngredientChanges, ValidationError> {
        let name = validate_name(self.name.as_deref())?;
        let unit_cost = required_amount(self.unit_cost.as_ref(), VALUE_REQUIRED, VALUE_NOT_NUMERIC)?;
        let weight_grams = required_amount(
            self.weight_grams.as_ref(),
            WEIGHT_REQUIRED,
            WEIGHT_NOT_NUMERIC,
        )?;

        Ok(IngredientChanges {
            supplier: trimmed_or_empty(self.supplier.as_deref()),
            name,
            unit_cost,
            weight_grams,
        })
    }
}

// =============================================================================
// Recipe DTOs
// =============================================================================

/// Ingredient reference inside a composition entry.
///
/// Clients send either the bare identity or the expanded ingredient they read back.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IngredientReference {
    Identity(String),
    Expanded {
        #[serde(rename = "_id")]
        ingredient_id: String,
    },
}

impl IngredientReference {
    fn identity(&self) -> &str {
        match self {
            Self::Identity(raw) | Self::Expanded { ingredient_id: raw } => raw,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompositionInput {
    #[serde(rename = "_id", default)]
    pub entry_id: Option<String>,
    #[serde(rename = "ingrediente", default)]
    pub ingredient: Option<IngredientReference>,
    #[serde(rename = "gr", default)]
    pub weight_grams: Option<Value>,
    #[serde(rename = "valor", default)]
    pub cost: Option<Value>,
}

/// Request body for creating or replacing a recipe.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeRequest {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "raciones", default)]
    pub servings: Option<Value>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    /// Anything other than an array is read as an empty composition.
    #[serde(rename = "composicion", default)]
    pub composition: Option<Value>,
}

impl RecipeRequest {
    /// Validates the request into replacement values for a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`NAME_REQUIRED`] for a blank name, [`INVALID_INGREDIENT_ID`] for a
    /// malformed ingredient reference, a not-numeric message for an amount that is
    /// not a number, or the parser message for a malformed entry.
    pub fn validate(self) -> Result<RecipeChanges, ValidationError> {
        let name = validate_name(self.name.as_deref())?;
        let servings = optional_amount(self.servings.as_ref(), SERVINGS_NOT_NUMERIC)?;

        let composition = match self.composition {
            Some(Value::Array(items)) => {
                let mut identities = ChildIdentities::default();
                items
                    .into_iter()
                    .map(|item| composition_entry(item, &mut identities))
                    .collect::<Result<Vec<_>, _>>()?
            }
            _ => Vec::new(),
        };

        Ok(RecipeChanges {
            name,
            servings,
            description: trimmed_or_empty(self.description.as_deref()),
            composition,
        })
    }
}

fn composition_entry(
    item: Value,
    identities: &mut ChildIdentities,
) -> Result<CompositionEntry, ValidationError> {
    let input: CompositionInput = serde_json::from_value(item)
        .map_err(|error| ValidationError::new(error.to_string()))?;

    let ingredient_id = input
        .ingredient
        .as_ref()
        .map(|reference| DocumentId::parse(reference.identity()))
        .transpose()
        .map_err(|_| ValidationError::new(INVALID_INGREDIENT_ID))?;

    let weight_grams = optional_amount(input.weight_grams.as_ref(), WEIGHT_NOT_NUMERIC)?;
    let cost = optional_amount(input.cost.as_ref(), VALUE_NOT_NUMERIC)?;

    Ok(CompositionEntry {
        entry_id: identities.next(input.entry_id.as_deref()),
        ingredient_id,
        weight_grams,
        cost,
    })
}

// =============================================================================
// Response DTOs
// =============================================================================

/// Confirmation body returned by delete endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Some("  Ana  "), Ok("Ana".to_string()))]
    #[case(Some("   "), Err(NAME_REQUIRED))]
    #[case(Some(""), Err(NAME_REQUIRED))]
    #[case(None, Err(NAME_REQUIRED))]
    fn test_validate_name(#[case] input: Option<&str>, #[case] expected: Result<String, &str>) {
        let result = validate_name(input).map_err(|error| error.message);
        assert_eq!(result, expected.map_err(str::to_string));
    }

    #[rstest]
    #[case(json!(2.5), Ok(2.5))]
    #[case(json!("2.5"), Ok(2.5))]
    #[case(json!(" 1000 "), Ok(1000.0))]
    #[case(json!(0), Err(VALUE_REQUIRED))]
    #[case(json!(""), Err(VALUE_REQUIRED))]
    #[case(json!(null), Err(VALUE_REQUIRED))]
    #[case(json!(false), Err(VALUE_REQUIRED))]
    #[case(json!("abc"), Err(VALUE_NOT_NUMERIC))]
    #[case(json!([1]), Err(VALUE_NOT_NUMERIC))]
    fn test_required_amount(#[case] input: Value, #[case] expected: Result<f64, &str>) {
        let result = required_amount(Some(&input), VALUE_REQUIRED, VALUE_NOT_NUMERIC)
            .map_err(|error| error.message);
        assert_eq!(result, expected.map_err(str::to_string));
    }

    #[rstest]
    fn test_required_amount_absent() {
        let result = required_amount(None, WEIGHT_REQUIRED, WEIGHT_NOT_NUMERIC);
        assert_eq!(result.unwrap_err().message, WEIGHT_REQUIRED);
    }

    #[rstest]
    #[case(None, Ok(0.0))]
    #[case(Some(json!(null)), Ok(0.0))]
    #[case(Some(json!("  ")), Ok(0.0))]
    #[case(Some(json!(4)), Ok(4.0))]
    #[case(Some(json!("4")), Ok(4.0))]
    #[case(Some(json!(" 2.5 ")), Ok(2.5))]
    #[case(Some(json!(true)), Ok(1.0))]
    #[case(Some(json!("cuatro")), Err(SERVINGS_NOT_NUMERIC))]
    #[case(Some(json!({ "n": 4 })), Err(SERVINGS_NOT_NUMERIC))]
    fn test_optional_amount(#[case] input: Option<Value>, #[case] expected: Result<f64, &str>) {
        let result =
            optional_amount(input.as_ref(), SERVINGS_NOT_NUMERIC).map_err(|error| error.message);
        assert_eq!(result, expected.map_err(str::to_string));
    }

    #[rstest]
    fn test_child_identities_replace_repeats() {
        let supplied = DocumentId::generate().to_string();
        let mut identities = ChildIdentities::default();

        let first = identities.next(Some(&supplied));
        let second = identities.next(Some(&supplied));
        let third = identities.next(None);

        assert_eq!(first.to_string(), supplied);
        assert_ne!(second, first);
        assert_ne!(third, first);
        assert_ne!(third, second);
    }

    #[rstest]
    fn test_parse_identity_uses_given_message() {
        let error = parse_identity("not-an-objectid", "ID de contacto inválido").unwrap_err();
        assert_eq!(error.message, "ID de contacto inválido");
    }

    #[rstest]
    fn test_contact_request_defaults() {
        let request: ContactRequest = serde_json::from_value(json!({ "nombre": " Ana " })).unwrap();
        let changes = request.validate().unwrap();

        assert_eq!(changes.name, "Ana");
        assert!(changes.company.is_empty());
        assert!(changes.phones.is_empty());
        assert!(changes.emails.is_empty());
    }

    #[rstest]
    fn test_contact_request_keeps_valid_child_identity() {
        let phone_id = DocumentId::generate();
        let request: ContactRequest = serde_json::from_value(json!({
            "nombre": "Ana",
            "empresa": "  Acme ",
            "telefonos": [
                { "_id": phone_id.to_string(), "numero": "555-0101", "tipo": "movil" },
                { "_id": "temp-1", "numero": "555-0102" }
            ]
        }))
        .unwrap();

        let changes = request.validate().unwrap();

        assert_eq!(changes.company, "Acme");
        assert_eq!(changes.phones[0].phone_id, phone_id);
        assert_eq!(changes.phones[0].kind, PhoneKind::Mobile);
        assert_ne!(changes.phones[1].phone_id, phone_id);
        assert_eq!(changes.phones[1].kind, PhoneKind::Personal);
    }

    #[rstest]
    fn test_contact_request_regenerates_repeated_child_identity() {
        let shared = DocumentId::generate().to_string();
        let request: ContactRequest = serde_json::from_value(json!({
            "nombre": "Ana",
            "telefonos": [
                { "_id": shared, "numero": "555-0101" },
                { "_id": shared, "numero": "555-0102" }
            ],
            "emails": [{ "_id": shared, "direccion": "ana@example.com" }]
        }))
        .unwrap();

        let changes = request.validate().unwrap();

        assert_eq!(changes.phones[0].phone_id.to_string(), shared);
        assert_ne!(changes.phones[1].phone_id, changes.phones[0].phone_id);
        assert_eq!(changes.emails[0].email_id.to_string(), shared);
    }

    #[rstest]
    fn test_ingredient_request_checks_name_first() {
        let request = IngredientRequest::default();
        assert_eq!(request.validate().unwrap_err().message, NAME_REQUIRED);
    }

    #[rstest]
    #[case(json!({ "nombre": "Flour", "gr": 1000 }), VALUE_REQUIRED)]
    #[case(json!({ "nombre": "Flour", "valor": 2.5 }), WEIGHT_REQUIRED)]
    #[case(json!({ "nombre": "Flour", "valor": 2.5, "gr": 0 }), WEIGHT_REQUIRED)]
    fn test_ingredient_request_missing_amounts(#[case] body: Value, #[case] expected: &str) {
        let request: IngredientRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.validate().unwrap_err().message, expected);
    }

    #[rstest]
    fn test_recipe_request_non_array_composition_is_empty() {
        let request: RecipeRequest = serde_json::from_value(json!({
            "nombre": " Pan ",
            "composicion": "none"
        }))
        .unwrap();

        let changes = request.validate().unwrap();

        assert_eq!(changes.name, "Pan");
        assert_eq!(changes.servings, 0.0);
        assert!(changes.description.is_empty());
        assert!(changes.composition.is_empty());
    }

    #[rstest]
    fn test_recipe_request_accepts_bare_and_expanded_references() {
        let flour = DocumentId::generate();
        let salt = DocumentId::generate();
        let request: RecipeRequest = serde_json::from_value(json!({
            "nombre": "Pan",
            "raciones": 4,
            "composicion": [
                { "ingrediente": flour.to_string(), "gr": 500, "valor": 1.25 },
                { "ingrediente": { "_id": salt.to_string(), "nombre": "Salt" }, "gr": 10 },
                { "gr": 3 }
            ]
        }))
        .unwrap();

        let changes = request.validate().unwrap();

        assert_eq!(changes.composition[0].ingredient_id, Some(flour));
        assert_eq!(changes.composition[1].ingredient_id, Some(salt));
        assert_eq!(changes.composition[1].cost, 0.0);
        assert_eq!(changes.composition[2].ingredient_id, None);
    }

    #[rstest]
    fn test_recipe_request_reads_numeric_strings() {
        let shared = DocumentId::generate().to_string();
        let request: RecipeRequest = serde_json::from_value(json!({
            "nombre": "Pan",
            "raciones": "4",
            "composicion": [
                { "_id": shared, "gr": "500", "valor": " 1.25 " },
                { "_id": shared, "gr": "" }
            ]
        }))
        .unwrap();

        let changes = request.validate().unwrap();

        assert_eq!(changes.servings, 4.0);
        assert_eq!(changes.composition[0].weight_grams, 500.0);
        assert_eq!(changes.composition[0].cost, 1.25);
        assert_eq!(changes.composition[1].weight_grams, 0.0);
        assert_ne!(changes.composition[1].entry_id, changes.composition[0].entry_id);
    }

    #[rstest]
    #[case(json!({ "nombre": "Pan", "raciones": "muchas" }), SERVINGS_NOT_NUMERIC)]
    #[case(json!({ "nombre": "Pan", "composicion": [{ "gr": "mucho" }] }), WEIGHT_NOT_NUMERIC)]
    #[case(json!({ "nombre": "Pan", "composicion": [{ "valor": [1] }] }), VALUE_NOT_NUMERIC)]
    fn test_recipe_request_rejects_non_numeric_amounts(#[case] body: Value, #[case] expected: &str) {
        let request: RecipeRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.validate().unwrap_err().message, expected);
    }

    #[rstest]
    fn test_recipe_request_rejects_malformed_reference() {
        let request: RecipeRequest = serde_json::from_value(json!({
            "nombre": "Pan",
            "composicion": [{ "ingrediente": "flour" }]
        }))
        .unwrap();

        assert_eq!(request.validate().unwrap_err().message, INVALID_INGREDIENT_ID);
    }

    #[rstest]
    fn test_create_record_request_generates_transaction_identities() {
        let request: CreateRecordRequest = serde_json::from_value(json!({
            "date": "2024-05-01",
            "transacciones": [
                { "date": "2024-05-01", "nombre": "Salary", "monto": 1500, "tipo": "ingreso" }
            ]
        }))
        .unwrap();

        let record = request.into_record(DocumentId::generate());

        assert_eq!(record.transactions.len(), 1);
        assert_eq!(record.transactions[0].kind, TransactionKind::Income);
    }

    #[rstest]
    fn test_create_record_request_regenerates_repeated_transaction_identity() {
        let shared = DocumentId::generate().to_string();
        let request: CreateRecordRequest = serde_json::from_value(json!({
            "date": "2024-05-01",
            "transacciones": [
                { "_id": shared, "date": "2024-05-01", "nombre": "A", "monto": 1, "tipo": "ingreso" },
                { "_id": shared, "date": "2024-05-01", "nombre": "B", "monto": 2, "tipo": "gasto" }
            ]
        }))
        .unwrap();

        let record = request.into_record(DocumentId::generate());

        assert_eq!(record.transactions[0].transaction_id.to_string(), shared);
        assert_ne!(record.transactions[1].transaction_id, record.transactions[0].transaction_id);
    }

    #[rstest]
    fn test_create_record_request_rejects_unknown_kind() {
        let result = serde_json::from_value::<CreateRecordRequest>(json!({
            "date": "2024-05-01",
            "transacciones": [
                { "date": "2024-05-01", "nombre": "Gift", "monto": 10, "tipo": "regalo" }
            ]
        }));

        assert!(result.is_err());
    }
}
