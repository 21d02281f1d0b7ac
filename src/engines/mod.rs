// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基于reqwest的文档抓取引擎
pub mod reqwest_engine;
/// 超时竞速执行器
pub mod timeout_race;
/// 引擎特征定义
pub mod traits;
/// URL安全校验
pub mod validators;
