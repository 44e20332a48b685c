//! EduManage - 学校管理 SaaS 后端服务
//!
//! 基于 Actix Web 构建，管理学生、教师、班级、课程、考试、考勤、
//! 课表、缴费、证明文件与订阅计费。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证与限流中间件
//! - `models`: 数据模型定义
//! - `pdf`: 收据、报表、课表与证明文件的 PDF 渲染
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod pdf;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
