use crate::database::models::UserRecord;
use crate::database::repositories::UserRepository;
use crate::database::Database;
use crate::error::{ServiceError, ServiceResult};
use crate::utils::non_empty;
use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Avatar assigned to every new account.
pub const DEFAULT_USER_IMAGE: &str = "assets/dog.jpg";

/// Accounts must belong to people older than this, counted in calendar years.
pub const MINIMUM_AGE: i32 = 16;

const BCRYPT_COST: u32 = 10;

#[derive(Clone)]
pub struct UserService {
    database: Database,
}

impl UserService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub fn create_user(&self, input: CreateUserInput) -> ServiceResult<UserView> {
        let (Some(name), Some(email), Some(password), Some(birth_date), Some(nick)) = (
            non_empty(input.nome),
            non_empty(input.email),
            non_empty(input.senha),
            non_empty(input.nascimento),
            non_empty(input.nick),
        ) else {
            return Err(ServiceError::Invalid(
                "Todos os campos são obrigatórios".into(),
            ));
        };

        let birth = NaiveDate::parse_from_str(&birth_date, "%Y-%m-%d")
            .map_err(|_| ServiceError::Invalid("Data de nascimento inválida".into()))?;
        if Utc::now().year() - birth.year() < MINIMUM_AGE {
            return Err(ServiceError::Invalid(
                "A idade deve ser maior que 16 anos".into(),
            ));
        }

        let email_owner = self
            .database
            .with_repositories(|repos| repos.users().find_by_email(&email))?;
        if email_owner.is_some() {
            return Err(ServiceError::Invalid("Email já está em uso".into()));
        }
        let nick_owner = self
            .database
            .with_repositories(|repos| repos.users().find_by_nick(&nick))?;
        if nick_owner.is_some() {
            return Err(ServiceError::Invalid("Nick já está em uso".into()));
        }

        let password_hash =
            bcrypt::hash(&password, BCRYPT_COST).context("failed to hash password")?;

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            name,
            nick,
            email,
            password_hash,
            birth_date,
            image: DEFAULT_USER_IMAGE.into(),
        };
        self.database
            .with_repositories(|repos| repos.users().create(&record))?;
        Ok(UserView::from_record(record))
    }

    pub fn list_users(&self, nick: Option<&str>, name: Option<&str>) -> ServiceResult<Vec<UserView>> {
        let users = self
            .database
            .with_repositories(|repos| repos.users().list(nick, name))?;
        Ok(users.into_iter().map(UserView::from_record).collect())
    }

    pub fn get_user(&self, id: &str) -> ServiceResult<UserProfileView> {
        let user = self
            .database
            .with_repositories(|repos| repos.users().get(id))?;
        match user {
            Some(record) => Ok(UserProfileView::from_record(record)),
            None => Err(ServiceError::NotFound("Usuário não encontrado".into())),
        }
    }

    pub fn update_user(&self, id: &str, input: UpdateUserInput) -> ServiceResult<UserView> {
        let name = non_empty(input.nome);
        let email = non_empty(input.email);
        let nick = non_empty(input.nick);
        if name.is_none() && email.is_none() && nick.is_none() {
            return Err(ServiceError::Invalid(
                "Pelo menos um campo deve ser fornecido para atualização".into(),
            ));
        }

        let Some(mut record) = self
            .database
            .with_repositories(|repos| repos.users().get(id))?
        else {
            return Err(ServiceError::NotFound("Usuário não encontrado".into()));
        };

        if let Some(email) = &email {
            let owner = self
                .database
                .with_repositories(|repos| repos.users().find_by_email(email))?;
            if let Some(owner) = owner {
                if owner.id != id {
                    return Err(ServiceError::Invalid("Email já está em uso".into()));
                }
            }
        }
        if let Some(nick) = &nick {
            let owner = self
                .database
                .with_repositories(|repos| repos.users().find_by_nick(nick))?;
            if let Some(owner) = owner {
                if owner.id != id {
                    return Err(ServiceError::Invalid("Nick já está em uso".into()));
                }
            }
        }

        if let Some(name) = name {
            record.name = name;
        }
        if let Some(email) = email {
            record.email = email;
        }
        if let Some(nick) = nick {
            record.nick = nick;
        }
        self.database
            .with_repositories(|repos| repos.users().update(&record))?;
        Ok(UserView::from_record(record))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserInput {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub senha: Option<String>,
    #[serde(default)]
    pub nascimento: Option<String>,
    #[serde(default)]
    pub nick: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserInput {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nick: Option<String>,
}

/// Public projection of an account, password hash excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub nome: String,
    pub email: String,
    pub nick: String,
    pub imagem: String,
    pub nascimento: String,
}

/// Projection used when fetching a profile by id; the id is omitted since
/// the caller already has it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileView {
    pub nome: String,
    pub email: String,
    pub nick: String,
    pub imagem: String,
    pub nascimento: String,
}

impl UserView {
    fn from_record(record: UserRecord) -> Self {
        Self {
            id: record.id,
            nome: record.name,
            email: record.email,
            nick: record.nick,
            imagem: record.image,
            nascimento: record.birth_date,
        }
    }
}

impl UserProfileView {
    fn from_record(record: UserRecord) -> Self {
        Self {
            nome: record.name,
            email: record.email,
            nick: record.nick,
            imagem: record.image,
            nascimento: record.birth_date,
        }
    }
}
