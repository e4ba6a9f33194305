//! LMSystem - 学习管理平台后端服务
//!
//! 基于 Actix Web 构建的学习管理系统后端，按服务拆分为
//! auth / content / assignment / gateway 四个可执行文件，共享同一套库代码。
//!
//! # 架构
//! - `clients`: 服务间 HTTP 客户端
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod clients;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
