//! `clientes` entity plus the field rules every write goes through.
//!
//! Column names follow the persisted schema (`nome`, `telefone`, ...);
//! Rust field names are the domain names.

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::errors::ModelError;

pub const NAME_MAX_LEN: usize = 255;
pub const EMAIL_MAX_LEN: usize = 255;
pub const PHONE_MAX_LEN: usize = 20;
const PHONE_MIN_DIGITS: usize = 8;
const PHONE_MAX_DIGITS: usize = 15;
const LIKE_ESCAPE: char = '!';

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clientes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "nome")]
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(column_name = "telefone")]
    pub phone: Option<String>,
    #[sea_orm(column_name = "criado_em")]
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(column_name = "atualizado_em")]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Trim the name; blank or oversized names are rejected.
pub fn normalize_name(name: &str) -> Result<String, ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(ModelError::Validation("name too long".into()));
    }
    Ok(trimmed.to_string())
}

/// Trim and lowercase the email, then check its syntax.
pub fn normalize_email(email: &str) -> Result<String, ModelError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("email required".into()));
    }
    let lowered = trimmed.to_lowercase();
    if lowered.chars().count() > EMAIL_MAX_LEN || !lowered.validate_email() {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(lowered)
}

/// Blank phones are absent; anything else must look like a phone number.
pub fn normalize_phone(phone: Option<&str>) -> Result<Option<String>, ModelError> {
    let trimmed = match phone.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(p) => p,
    };
    if !is_phone(trimmed) {
        return Err(ModelError::Validation("invalid phone".into()));
    }
    Ok(Some(trimmed.to_string()))
}

fn is_phone(p: &str) -> bool {
    if p.chars().count() > PHONE_MAX_LEN {
        return false;
    }
    let body = p.strip_prefix('+').unwrap_or(p);
    if !body.chars().all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')')) {
        return false;
    }
    let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}

/// Escape LIKE wildcards so the term matches literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Insert a customer. Fields are normalized here as well, so no caller can
/// store an untrimmed name or a mixed-case email.
pub async fn create(db: &DatabaseConnection, name: &str, email: &str, phone: Option<&str>) -> Result<Model, ModelError> {
    let name = normalize_name(name)?;
    let email = normalize_email(email)?;
    let phone = normalize_phone(phone)?;
    let am = ActiveModel {
        name: Set(name),
        email: Set(email),
        phone: Set(phone),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Exact email lookup; the stored value is lowercased before comparing.
pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    let needle = email.trim().to_lowercase();
    let found = Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(Column::Email))).eq(needle))
        .one(db)
        .await?;
    Ok(found)
}

/// Case-insensitive substring match on the name, ordered by name.
///
/// Both sides go through the store's `LOWER`, so the pattern folds exactly
/// like the column does.
pub async fn find_by_name_containing(db: &DatabaseConnection, term: &str) -> Result<Vec<Model>, ModelError> {
    let matches = Expr::cust_with_exprs(
        format!("LOWER($1) LIKE LOWER($2) ESCAPE '{}'", LIKE_ESCAPE),
        [SimpleExpr::from(Expr::col(Column::Name)), Expr::val(contains_pattern(term)).into()],
    );
    let found = Entity::find()
        .filter(matches)
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(found)
}

pub async fn list_ordered_by_name(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    let all = Entity::find()
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(all)
}

/// Remove a row; returns whether one existed.
pub async fn hard_delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
