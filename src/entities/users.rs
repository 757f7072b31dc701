use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub name: String,

    /// Unset until the owner account is provisioned.
    #[sea_orm(column_type = "String(StringLen::N(20))", nullable)]
    pub username: Option<String>,

    /// Argon2id password hash
    #[sea_orm(column_type = "String(StringLen::N(128))", nullable)]
    pub password_hash: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
