// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，这些服务封装了复杂的
/// 业务规则和领域逻辑，协调多个领域对象来完成业务操作。
///
/// 包含的服务：
/// - 链接边界（frontier）：去重、限界、优先级排序的爬取队列
/// - 爬取引擎（crawler_engine）：可复用的顺序爬取循环
/// - 提取服务（extraction_service）：正文、页脚链接和社交链接提取
/// - 分析服务（analysis_service）：LLM提示词构建与响应解码
/// - 验证服务（validation_service）：URL验证状态机
pub mod analysis_service;
pub mod crawler_engine;
pub mod extraction_service;
pub mod frontier;
pub mod validation_service;
