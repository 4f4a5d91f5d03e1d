// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

crate::diesel_newtype! {
    #[derive(Copy)] TableId(uuid::Uuid) => diesel::sql_types::Uuid
}

impl TableId {
    /// Create a new random [`TableId`]
    pub fn generate() -> Self {
        Self::from(uuid::Uuid::new_v4())
    }
}
