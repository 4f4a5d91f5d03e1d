// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

crate::diesel_newtype! {
    #[derive(Copy)] CheckinId(uuid::Uuid) => diesel::sql_types::Uuid
}

impl CheckinId {
    /// Create a new random [`CheckinId`]
    pub fn generate() -> Self {
        Self::from(uuid::Uuid::new_v4())
    }
}
