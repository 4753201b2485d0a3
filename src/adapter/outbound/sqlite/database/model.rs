//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::clients;
use crate::domain::{NewRelationalClient, RelationalClientRow};

/// Database row for a client (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClientRow {
    pub id: i64,
    pub company_id: i64,
    pub client_name: String,
    pub client_email: String,
    pub metadata: String,
}

/// Database row for a client (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = clients)]
pub struct NewClientRow<'a> {
    pub company_id: i64,
    pub client_name: &'a str,
    pub client_email: &'a str,
    pub metadata: &'a str,
}

impl<'a> From<&'a NewRelationalClient> for NewClientRow<'a> {
    fn from(row: &'a NewRelationalClient) -> Self {
        Self {
            company_id: row.company_id,
            client_name: &row.client_name,
            client_email: &row.client_email,
            metadata: &row.metadata_blob,
        }
    }
}

impl From<ClientRow> for RelationalClientRow {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            company_id: row.company_id,
            client_name: row.client_name,
            client_email: row.client_email,
            metadata_blob: row.metadata,
        }
    }
}
