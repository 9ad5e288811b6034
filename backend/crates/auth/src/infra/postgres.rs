//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::principal::{Principal, PrincipalProfile};
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::{
    admin_designation::AdminDesignation, email::Email, enrollment_number::EnrollmentNumber,
    faculty_id::FacultyId, full_name::FullName, principal_id::PrincipalId,
    principal_role::PrincipalRole, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

const PRINCIPAL_COLUMNS: &str = r#"
    principal_id,
    role,
    email,
    password_hash,
    full_name,
    designation,
    faculty_id,
    enrollment_number,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgPrincipalRepository {
    pool: PgPool,
}

impl PgPrincipalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        bind_a: &str,
        bind_b: Option<&str>,
    ) -> AuthResult<Option<Principal>> {
        let sql = format!("SELECT {PRINCIPAL_COLUMNS} FROM principals WHERE {clause}");
        let mut query = sqlx::query_as::<_, PrincipalRow>(&sql).bind(bind_a);
        if let Some(b) = bind_b {
            query = query.bind(b);
        }
        let row = query.fetch_optional(&self.pool).await?;

        row.map(PrincipalRow::into_principal).transpose()
    }
}

/// Map a unique violation to the identity that collided
fn map_insert_error(err: sqlx::Error) -> AuthError {
    if !is_unique_violation(&err) {
        return AuthError::Database(err);
    }
    let constraint = match &err {
        sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_owned),
        _ => None,
    };
    match constraint.as_deref() {
        Some("principals_role_email_key") => AuthError::EmailTaken,
        Some("principals_enrollment_number_key") => AuthError::EnrollmentNumberTaken,
        Some("principals_faculty_id_key") => AuthError::FacultyIdTaken,
        _ => AuthError::Database(err),
    }
}

impl PrincipalRepository for PgPrincipalRepository {
    async fn create(&self, principal: &Principal) -> AuthResult<()> {
        let profile = &principal.profile;

        sqlx::query(
            r#"
            INSERT INTO principals (
                principal_id,
                role,
                email,
                password_hash,
                full_name,
                designation,
                faculty_id,
                enrollment_number,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(principal.principal_id.as_uuid())
        .bind(principal.role().code())
        .bind(principal.email.as_str())
        .bind(principal.password_hash.as_phc_string())
        .bind(profile.full_name().map(FullName::as_str))
        .bind(profile.designation().map(|d| d.code()))
        .bind(profile.faculty_id().map(FacultyId::as_str))
        .bind(profile.enrollment_number().map(EnrollmentNumber::as_str))
        .bind(principal.created_at)
        .bind(principal.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn find_by_id(&self, principal_id: &PrincipalId) -> AuthResult<Option<Principal>> {
        let sql = format!("SELECT {PRINCIPAL_COLUMNS} FROM principals WHERE principal_id = $1");
        let row = sqlx::query_as::<_, PrincipalRow>(&sql)
            .bind(principal_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(PrincipalRow::into_principal).transpose()
    }

    async fn find_by_email(
        &self,
        role: PrincipalRole,
        email: &Email,
    ) -> AuthResult<Option<Principal>> {
        self.fetch_one_where("role = $1 AND email = $2", role.code(), Some(email.as_str()))
            .await
    }

    async fn find_by_enrollment_number(
        &self,
        enrollment_number: &EnrollmentNumber,
    ) -> AuthResult<Option<Principal>> {
        self.fetch_one_where("enrollment_number = $1", enrollment_number.as_str(), None)
            .await
    }

    async fn exists_by_email(&self, role: PrincipalRole, email: &Email) -> AuthResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM principals WHERE role = $1 AND email = $2)",
        )
        .bind(role.code())
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_enrollment_number(
        &self,
        enrollment_number: &EnrollmentNumber,
    ) -> AuthResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM principals WHERE enrollment_number = $1)",
        )
        .bind(enrollment_number.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_faculty_id(&self, faculty_id: &FacultyId) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM principals WHERE faculty_id = $1)")
                .bind(faculty_id.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_password(
        &self,
        principal_id: &PrincipalId,
        password_hash: &UserPassword,
        updated_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let affected = sqlx::query(
            r#"
            UPDATE principals
            SET password_hash = $2, updated_at = $3
            WHERE principal_id = $1
            "#,
        )
        .bind(principal_id.as_uuid())
        .bind(password_hash.as_phc_string())
        .bind(updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(AuthError::PrincipalNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PrincipalRow {
    principal_id: Uuid,
    role: String,
    email: String,
    password_hash: String,
    full_name: Option<String>,
    designation: Option<String>,
    faculty_id: Option<String>,
    enrollment_number: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PrincipalRow {
    fn into_principal(self) -> AuthResult<Principal> {
        let corrupt = |what: &str| {
            AuthError::Internal(format!(
                "Corrupt principal row {}: {}",
                self.principal_id, what
            ))
        };

        let role = PrincipalRole::from_code(&self.role).ok_or_else(|| corrupt("role"))?;
        let full_name = self.full_name.as_deref().map(FullName::from_db);

        let profile = match role {
            PrincipalRole::Admin => PrincipalProfile::Admin {
                designation: self
                    .designation
                    .as_deref()
                    .and_then(AdminDesignation::from_db)
                    .ok_or_else(|| corrupt("designation"))?,
            },
            PrincipalRole::Faculty => PrincipalProfile::Faculty {
                faculty_id: self
                    .faculty_id
                    .as_deref()
                    .map(FacultyId::from_db)
                    .ok_or_else(|| corrupt("faculty_id"))?,
                full_name: full_name.ok_or_else(|| corrupt("full_name"))?,
            },
            PrincipalRole::Student => PrincipalProfile::Student {
                enrollment_number: self
                    .enrollment_number
                    .as_deref()
                    .map(EnrollmentNumber::from_db)
                    .ok_or_else(|| corrupt("enrollment_number"))?,
                full_name: full_name.ok_or_else(|| corrupt("full_name"))?,
            },
        };

        let password_hash = UserPassword::from_phc_string(self.password_hash.as_str())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(Principal {
            principal_id: PrincipalId::from_uuid(self.principal_id),
            email: Email::from_db(self.email.as_str()),
            password_hash,
            profile,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
