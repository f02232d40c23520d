/// Name of the primary key constraint on `url_records.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "url_records_pkey";

pub fn is_unique_violation_on_short_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
}
