use sea_orm_migration::prelude::*;

use super::Users;

/// Demo account used by the local docker-compose stack.
const DEMO_USERNAME: &str = "test";
const DEMO_PASSWORD: &str = "test";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let insert = Query::insert()
            .into_table(Users::Table)
            .columns([Users::Username, Users::Password])
            .values([DEMO_USERNAME.into(), DEMO_PASSWORD.into()])
            .map_err(|e| DbErr::Migration(e.to_string()))?
            .to_owned();

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Users::Table)
            .and_where(Expr::col(Users::Username).eq(DEMO_USERNAME))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}
