// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 处理器模块
///
/// 每个端点族一个处理器文件：
/// - probe_handler：批量重定向探测
/// - validator_handler：URL验证与激活标志回写
/// - crawler_handler：四个有界爬虫端点
/// - analysis_handler：对既有内容的独立LLM分析
/// - screenshot_handler：截图批处理
pub mod analysis_handler;
pub mod crawler_handler;
pub mod probe_handler;
pub mod screenshot_handler;
pub mod validator_handler;
