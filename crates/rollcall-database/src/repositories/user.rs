//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use rollcall_core::error::{AppError, ErrorKind};
use rollcall_core::result::AppResult;
use rollcall_core::types::pagination::{PageRequest, PageResponse};
use rollcall_entity::user::{CreateUser, UpdateUser, User, UserRole};

/// Filters for the user listing query. All fields combine with AND.
#[derive(Debug, Clone, Default)]
pub struct UserListFilter {
    /// Restrict to a single role.
    pub role: Option<UserRole>,
    /// Restrict to a trade label.
    pub trade: Option<String>,
    /// Restrict to a department label.
    pub department: Option<String>,
    /// Restrict to active (true) or deactivated (false) accounts.
    pub is_active: Option<bool>,
    /// Case-insensitive substring search over name/email/roll/trade/department.
    pub search: Option<String>,
}

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Find a user by roll number.
    pub async fn find_by_roll_no(&self, roll_no: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE roll_no = $1")
            .bind(roll_no)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by roll number", e)
            })
    }

    /// List users with filters and pagination.
    pub async fn list(
        &self,
        filter: &UserListFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if filter.role.is_some() {
            conditions.push(format!("role = ${param_idx}"));
            param_idx += 1;
        }
        if filter.trade.is_some() {
            conditions.push(format!("trade = ${param_idx}"));
            param_idx += 1;
        }
        if filter.department.is_some() {
            conditions.push(format!("department = ${param_idx}"));
            param_idx += 1;
        }
        if filter.is_active.is_some() {
            conditions.push(format!("is_active = ${param_idx}"));
            param_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(name ILIKE ${param_idx} OR email ILIKE ${param_idx} \
                 OR roll_no ILIKE ${param_idx} OR trade ILIKE ${param_idx} \
                 OR department ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM users {where_clause}");
        let select_sql = format!(
            "SELECT * FROM users {where_clause} ORDER BY created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, User>(&select_sql);

        if let Some(role) = filter.role {
            count_query = count_query.bind(role);
            select_query = select_query.bind(role);
        }
        if let Some(trade) = &filter.trade {
            count_query = count_query.bind(trade.clone());
            select_query = select_query.bind(trade.clone());
        }
        if let Some(department) = &filter.department {
            count_query = count_query.bind(department.clone());
            select_query = select_query.bind(department.clone());
        }
        if let Some(is_active) = filter.is_active {
            count_query = count_query.bind(is_active);
            select_query = select_query.bind(is_active);
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            count_query = count_query.bind(pattern.clone());
            select_query = select_query.bind(pattern);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(
            users,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new user.
    ///
    /// Duplicate email or roll number violations are mapped by constraint
    /// name into `Conflict`.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, trade, department, roll_no, role) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.trade)
        .bind(data.effective_department())
        .bind(&data.roll_no)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict(format!("Email '{}' is already registered", data.email))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_roll_no_key") =>
            {
                AppError::conflict(format!("Roll number '{}' is already registered", data.roll_no))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Update a user's profile fields.
    pub async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = COALESCE($2, name), \
                              trade = COALESCE($3, trade), \
                              department = COALESCE($4, department), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.trade)
        .bind(&data.department)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Update a user's password hash.
    pub async fn update_password(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Update a user's role.
    pub async fn update_role(&self, user_id: Uuid, role: UserRole) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Set a user's active flag (soft delete / reactivate).
    pub async fn set_active(&self, user_id: Uuid, is_active: bool) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update active flag", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Store a user's generated QR payload and rendered image.
    pub async fn update_qr(&self, user_id: Uuid, payload: &str, image: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET qr_payload = $2, qr_image = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(payload)
        .bind(image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store QR code", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Physically delete a user by ID.
    pub async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}
