// Copyright 2026 Anapaya Systems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! SCION hop-by-hop and end-to-end options extensions.
//!
//! Both extensions share the same format. They differ in who processes them and in their
//! position in the header chain: a hop-by-hop extension, if present, always precedes an
//! end-to-end extension.

pub mod chain;
pub mod layout;
pub mod model;
pub mod view;
