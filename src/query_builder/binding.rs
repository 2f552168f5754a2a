//! Positional binding of rendered batch queries onto SQLite statements.
//!
//! Only binds; running the statement is left to the caller's executor.

use super::batch_query::BatchQuery;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

impl BatchQuery {
    /// Bind the selection arguments, in order, onto `sql`
    ///
    /// `sql` is normally produced by [`BatchQuery::to_select_sql`] or embeds
    /// [`BatchQuery::selection`] so that its placeholders line up with the
    /// argument list.
    pub fn bind<'q>(&'q self, sql: &'q str) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        self.selection_arguments()
            .iter()
            .fold(sqlx::query(sql), |query, argument| query.bind(argument.as_str()))
    }
}
