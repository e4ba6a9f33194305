//! 抽认卡存储操作

use super::SeaOrmStorage;
use crate::entity::flashcards::{ActiveModel, Column, Entity as Flashcards};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo,
    content::{
        entities::Flashcard,
        requests::{ChildListQuery, CreateFlashcardRequest, ReorderItem, UpdateFlashcardRequest},
        responses::FlashcardListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashSet;

impl SeaOrmStorage {
    /// 创建抽认卡并重算卡组计数
    pub async fn create_flashcard_impl(&self, req: CreateFlashcardRequest) -> Result<Flashcard> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            deck_id: Set(req.deck_id.clone()),
            front: Set(req.front),
            back: Set(req.back),
            order: Set(req.order),
            difficulty: Set(req.difficulty.map(|d| d.to_string())),
            wordclass: Set(req.wordclass),
            definition: Set(req.definition),
            example: Set(req.example),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("创建抽认卡失败: {e}")))?;

        self.recompute_deck_flashcard_count(&req.deck_id).await?;

        Ok(result.into_flashcard())
    }

    /// 通过 ID 获取抽认卡，软删除的记录也返回
    pub async fn get_flashcard_by_id_impl(&self, flashcard_id: &str) -> Result<Option<Flashcard>> {
        let result = Flashcards::find_by_id(flashcard_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询抽认卡失败: {e}")))?;

        Ok(result.map(|m| m.into_flashcard()))
    }

    /// 分页列出卡组下的卡片，按排序值升序
    pub async fn list_deck_flashcards_impl(
        &self,
        deck_id: &str,
        query: ChildListQuery,
    ) -> Result<FlashcardListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let select = Flashcards::find()
            .filter(Column::DeckId.eq(deck_id))
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::Order);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询卡片总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询卡片页数失败: {e}")))?;

        let flashcards = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询卡片列表失败: {e}")))?;

        Ok(FlashcardListResponse {
            items: flashcards.into_iter().map(|m| m.into_flashcard()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新抽认卡
    pub async fn update_flashcard_impl(
        &self,
        flashcard_id: &str,
        update: UpdateFlashcardRequest,
    ) -> Result<Option<Flashcard>> {
        // 先检查卡片是否存在
        let existing = self.get_flashcard_by_id_impl(flashcard_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(flashcard_id.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(front) = update.front {
            model.front = Set(front);
        }

        if let Some(back) = update.back {
            model.back = Set(back);
        }

        if let Some(order) = update.order {
            model.order = Set(order);
        }

        if let Some(difficulty) = update.difficulty {
            model.difficulty = Set(Some(difficulty.to_string()));
        }

        if let Some(wordclass) = update.wordclass {
            model.wordclass = Set(Some(wordclass));
        }

        if let Some(definition) = update.definition {
            model.definition = Set(Some(definition));
        }

        if let Some(example) = update.example {
            model.example = Set(Some(example));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新抽认卡失败: {e}")))?;

        self.get_flashcard_by_id_impl(flashcard_id).await
    }

    /// 软删除抽认卡并重算卡组计数
    pub async fn delete_flashcard_impl(&self, flashcard_id: &str) -> Result<bool> {
        let Some(flashcard) = self.get_flashcard_by_id_impl(flashcard_id).await? else {
            return Ok(false);
        };

        let now = chrono::Utc::now().timestamp();

        let result = Flashcards::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(flashcard_id))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("删除抽认卡失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(false);
        }

        self.recompute_deck_flashcard_count(&flashcard.deck_id)
            .await?;

        Ok(true)
    }

    /// 批量重排卡组下的卡片
    ///
    /// 重复的卡片 ID 会在写入前整体拒绝；不属于该卡组的 ID 被忽略。
    pub async fn reorder_flashcards_impl(
        &self,
        deck_id: &str,
        items: Vec<ReorderItem>,
    ) -> Result<i64> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(LMSystemError::validation(format!(
                    "重排列表包含重复卡片 ID: {}",
                    item.id
                )));
            }
        }

        let now = chrono::Utc::now().timestamp();
        let mut updated = 0i64;

        for item in items {
            let result = Flashcards::update_many()
                .col_expr(Column::Order, sea_orm::sea_query::Expr::value(item.order))
                .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
                .filter(Column::Id.eq(item.id))
                .filter(Column::DeckId.eq(deck_id))
                .filter(Column::IsActive.eq(true))
                .exec(&self.db)
                .await
                .map_err(|e| LMSystemError::database_operation(format!("重排卡片失败: {e}")))?;

            updated += result.rows_affected as i64;
        }

        Ok(updated)
    }
}
