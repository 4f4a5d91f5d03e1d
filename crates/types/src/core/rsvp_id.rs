// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

crate::diesel_newtype! {
    #[derive(Copy)] RsvpId(uuid::Uuid) => diesel::sql_types::Uuid
}

impl RsvpId {
    /// Create a new random [`RsvpId`]
    pub fn generate() -> Self {
        Self::from(uuid::Uuid::new_v4())
    }
}
