// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含请求准入、分发路由和爬取用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体和协作服务接口
pub mod domain;

/// 引擎模块
///
/// 实现文档抓取引擎与超时竞速执行器
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如缓存、认证、额度和指标
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和响应构建
pub mod presentation;

/// 队列模块
///
/// 实现异步爬取任务的提交
pub mod queue;

/// 工具模块
///
/// 提供错误类型和日志初始化
pub mod utils;
