//! User listing query - filtri e ordinamento della lista utenti

use super::{SqlQuery, push_clause};
use crate::dtos::UserParams;
use crate::entities::{Gender, UserOrderBy, UserWithMainPhoto};
use chrono::{Months, NaiveDate};
use sqlx::{MySql, QueryBuilder};
use std::collections::BTreeSet;

/// Age bounds that mean "no age filter"
pub const DEFAULT_MIN_AGE: u32 = 18;
pub const DEFAULT_MAX_AGE: u32 = 99;
/// Età oltre questo limite vengono ridotte prima di calcolare le date
pub const AGE_CEILING: u32 = 150;

/// Single narrowing step of the user listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    ExcludeId(i32),
    Gender(Gender),
    IdIn(BTreeSet<i32>),
    /// inclusive on both ends
    BornBetween {
        earliest: NaiveDate,
        latest: NaiveDate,
    },
}

impl UserFilter {
    fn push_sql(&self, qb: &mut QueryBuilder<'_, MySql>) {
        match self {
            UserFilter::ExcludeId(id) => {
                qb.push("u.user_id <> ").push_bind(*id);
            }
            UserFilter::Gender(gender) => {
                qb.push("u.gender = ").push_bind(gender.as_str());
            }
            // IN () non è SQL valido: un insieme vuoto non lascia passare nessuno
            UserFilter::IdIn(ids) if ids.is_empty() => {
                qb.push("FALSE");
            }
            UserFilter::IdIn(ids) => {
                qb.push("u.user_id IN (");
                let mut separated = qb.separated(", ");
                for id in ids {
                    separated.push_bind(*id);
                }
                separated.push_unseparated(")");
            }
            UserFilter::BornBetween { earliest, latest } => {
                qb.push("u.date_of_birth BETWEEN ")
                    .push_bind(*earliest)
                    .push(" AND ")
                    .push_bind(*latest);
            }
        }
    }
}

/// Ordered pipeline of filters plus the ordering of the user listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserQuery {
    filters: Vec<UserFilter>,
    order_by: UserOrderBy,
}

impl UserQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: UserFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, order_by: UserOrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn filters(&self) -> &[UserFilter] {
        &self.filters
    }

    /// Builds the listing query for `params.user_id`.
    ///
    /// `likers` / `likees` carry the resolved id sets and are `Some` only when the
    /// corresponding flag was requested. Filters are added in a fixed order:
    /// self exclusion, gender, likers, likees, age range. Ages above
    /// `AGE_CEILING` are clamped so the birth-date bounds stay representable.
    pub fn listing(
        params: &UserParams,
        likers: Option<BTreeSet<i32>>,
        likees: Option<BTreeSet<i32>>,
        today: NaiveDate,
    ) -> Self {
        let mut query = UserQuery::new().filter(UserFilter::ExcludeId(params.user_id));

        if let Some(gender) = params.gender {
            query = query.filter(UserFilter::Gender(gender));
        }

        if let Some(ids) = likers {
            query = query.filter(UserFilter::IdIn(ids));
        }

        if let Some(ids) = likees {
            query = query.filter(UserFilter::IdIn(ids));
        }

        let min_age = params.min_age.min(AGE_CEILING);
        let max_age = params.max_age.min(AGE_CEILING);
        if min_age != DEFAULT_MIN_AGE || max_age != DEFAULT_MAX_AGE {
            query = query.filter(UserFilter::BornBetween {
                earliest: years_before(today, max_age + 1),
                latest: years_before(today, min_age),
            });
        }

        query.order_by(params.order_by)
    }
}

impl SqlQuery for UserQuery {
    type Row = UserWithMainPhoto;

    const SELECT_FROM: &'static str = "SELECT u.user_id, u.username, u.password, u.gender, \
        u.date_of_birth, u.known_as, u.created, u.last_active, u.introduction, u.looking_for, \
        u.interests, u.city, u.country, \
        (SELECT p.url FROM photos p WHERE p.user_id = u.user_id AND p.is_main = TRUE \
        ORDER BY p.photo_id LIMIT 1) AS photo_url \
        FROM users u";

    const COUNT_FROM: &'static str = "SELECT COUNT(*) FROM users u";

    fn push_conditions(&self, qb: &mut QueryBuilder<'_, MySql>) {
        let mut first = true;
        for filter in &self.filters {
            push_clause(qb, &mut first);
            filter.push_sql(qb);
        }
    }

    fn push_ordering(&self, qb: &mut QueryBuilder<'_, MySql>) {
        qb.push(match self.order_by {
            UserOrderBy::Created => " ORDER BY u.created DESC, u.user_id DESC",
            UserOrderBy::LastActive => " ORDER BY u.last_active DESC, u.user_id DESC",
        });
    }
}

/// `today` meno `years` anni; il 29 febbraio diventa 28 negli anni non bisestili
fn years_before(today: NaiveDate, years: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(years * 12))
        .unwrap_or(today)
}
