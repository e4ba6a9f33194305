//! 刷新令牌存储操作

use super::SeaOrmStorage;
use crate::entity::refresh_tokens::{ActiveModel, Column, Entity as RefreshTokens};
use crate::errors::{LMSystemError, Result};
use crate::models::auth::entities::RefreshTokenRecord;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 持久化刷新令牌
    pub async fn store_refresh_token_impl(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            token: Set(token.to_string()),
            user_id: Set(user_id),
            is_active: Set(true),
            expires_at: Set(expires_at.timestamp()),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("保存刷新令牌失败: {e}")))?;

        Ok(result.into_refresh_token())
    }

    /// 查找刷新令牌
    pub async fn get_refresh_token_impl(&self, token: &str) -> Result<Option<RefreshTokenRecord>> {
        let result = RefreshTokens::find()
            .filter(Column::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询刷新令牌失败: {e}")))?;

        Ok(result.map(|m| m.into_refresh_token()))
    }

    /// 吊销单个刷新令牌
    pub async fn revoke_refresh_token_impl(&self, token: &str) -> Result<bool> {
        let result = RefreshTokens::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .filter(Column::Token.eq(token))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("吊销刷新令牌失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 吊销用户全部刷新令牌
    pub async fn revoke_user_refresh_tokens_impl(&self, user_id: i64) -> Result<u64> {
        let result = RefreshTokens::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("吊销用户刷新令牌失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
