// Copyright 2024 The LedgerDesk Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Typed handles for the individual backend endpoint groups.
//!
//! Handles are obtained from a [`Client`] and hold a clone of it, so they
//! can be kept around and used concurrently.
//!
//! [`Client`]: crate::Client

pub mod appointments;
pub mod calendar;
pub mod invoices;
pub mod knowledge_base;
pub mod notifications;
pub mod payments;
pub mod services;
pub mod teams;

pub use appointments::{Appointment, AppointmentChanges, AppointmentsHandle, NewAppointment};
pub use calendar::{CalendarEvent, CalendarEventChanges, CalendarHandle, NewCalendarEvent};
pub use invoices::{Invoice, InvoicesHandle};
pub use knowledge_base::{Article, KnowledgeBaseHandle};
pub use notifications::{Notification, NotificationPreferences, NotificationsHandle};
pub use payments::{NewPayment, Payment, PaymentsHandle};
pub use services::{Service, ServicesHandle};
pub use teams::{TeamsHandle, TeamsMeeting};
