//! 卡组存储操作

use super::SeaOrmStorage;
use crate::entity::decks::{ActiveModel, Column, Entity as Decks};
use crate::entity::flashcards::{Column as FlashcardColumn, Entity as Flashcards};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo,
    content::{
        entities::Deck,
        requests::{ContentListQuery, CreateDeckRequest, UpdateDeckRequest},
        responses::DeckListResponse,
    },
};
use crate::utils::{escape_like_pattern, validate::normalize_tags};
use sea_orm::sea_query::{Expr, ExprTrait, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

fn encode_tags(tags: &[String]) -> Result<Option<String>> {
    if tags.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(tags)?))
}

impl SeaOrmStorage {
    /// 创建卡组
    pub async fn create_deck_impl(
        &self,
        instructor_id: i64,
        instructor_name: Option<String>,
        req: CreateDeckRequest,
    ) -> Result<Deck> {
        let now = chrono::Utc::now().timestamp();
        let tags = normalize_tags(&req.tags);

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            title: Set(req.title),
            description: Set(req.description),
            instructor_id: Set(instructor_id),
            instructor_name: Set(instructor_name),
            total_flashcards: Set(0),
            category: Set(req.category),
            tags: Set(encode_tags(&tags)?),
            is_active: Set(true),
            is_published: Set(req.is_published),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("创建卡组失败: {e}")))?;

        Ok(result.into_deck())
    }

    /// 通过 ID 获取卡组，软删除的记录也返回
    pub async fn get_deck_by_id_impl(&self, deck_id: &str) -> Result<Option<Deck>> {
        let result = Decks::find_by_id(deck_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询卡组失败: {e}")))?;

        Ok(result.map(|m| m.into_deck()))
    }

    /// 分页列出卡组
    pub async fn list_decks_with_pagination_impl(
        &self,
        query: ContentListQuery,
    ) -> Result<DeckListResponse> {
        let page = std::cmp::Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Decks::find().filter(Column::IsActive.eq(true));

        // 搜索条件（标题或描述），LIKE 带显式 ESCAPE，通配符按字面量匹配
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = format!("%{}%", escape_like_pattern(search.trim()));
            select = select.filter(
                Condition::any()
                    .add(Expr::col(Column::Title).like(LikeExpr::new(&pattern).escape('\\')))
                    .add(Expr::col(Column::Description).like(LikeExpr::new(&pattern).escape('\\'))),
            );
        }

        // 发布状态筛选
        if let Some(is_published) = query.is_published {
            select = select.filter(Column::IsPublished.eq(is_published));
        }

        // 讲师筛选
        if let Some(instructor_id) = query.instructor_id {
            select = select.filter(Column::InstructorId.eq(instructor_id));
        }

        // 分类筛选
        if let Some(ref category) = query.category {
            select = select.filter(Column::Category.eq(category));
        }

        // 学生可见范围：已分配的内容或已发布内容
        if let Some(visible_ids) = query.visible_ids {
            select = select.filter(
                Condition::any()
                    .add(Column::Id.is_in(visible_ids))
                    .add(Column::IsPublished.eq(true)),
            );
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询卡组总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询卡组页数失败: {e}")))?;

        let decks = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询卡组列表失败: {e}")))?;

        Ok(DeckListResponse {
            items: decks.into_iter().map(|m| m.into_deck()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新卡组
    pub async fn update_deck_impl(
        &self,
        deck_id: &str,
        update: UpdateDeckRequest,
    ) -> Result<Option<Deck>> {
        // 先检查卡组是否存在
        let existing = self.get_deck_by_id_impl(deck_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(deck_id.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(category) = update.category {
            model.category = Set(Some(category));
        }

        if let Some(tags) = update.tags {
            let tags = normalize_tags(&tags);
            model.tags = Set(encode_tags(&tags)?);
        }

        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新卡组失败: {e}")))?;

        self.get_deck_by_id_impl(deck_id).await
    }

    /// 软删除卡组及其卡片
    pub async fn delete_deck_impl(&self, deck_id: &str) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Decks::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(deck_id))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("删除卡组失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(false);
        }

        // 级联软删除卡片
        Flashcards::update_many()
            .col_expr(
                FlashcardColumn::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .col_expr(
                FlashcardColumn::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(FlashcardColumn::DeckId.eq(deck_id))
            .filter(FlashcardColumn::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("删除卡组卡片失败: {e}")))?;

        Ok(true)
    }

    /// 重算卡组的活跃卡片数
    pub(crate) async fn recompute_deck_flashcard_count(&self, deck_id: &str) -> Result<()> {
        let count = Flashcards::find()
            .filter(FlashcardColumn::DeckId.eq(deck_id))
            .filter(FlashcardColumn::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计卡片数量失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();

        Decks::update_many()
            .col_expr(
                Column::TotalFlashcards,
                sea_orm::sea_query::Expr::value(count as i32),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(deck_id))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新卡片计数失败: {e}")))?;

        Ok(())
    }
}
