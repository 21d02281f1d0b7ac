// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod api_key_auth_service;
pub mod credits_service_impl;
pub mod domain_blocklist;
