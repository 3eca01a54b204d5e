// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::blockchain::TransactionIssuer;

#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<TransactionIssuer>,
}

impl AppState {
    pub fn new(issuer: TransactionIssuer) -> Self {
        Self {
            issuer: Arc::new(issuer),
        }
    }
}
