// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod auth_service;
pub mod blocklist_service;
pub mod credits_service;
