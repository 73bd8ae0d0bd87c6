//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Option subnegotiation grammars.
//!
//! Each module decodes one option's `IAC SB <opt> … IAC SE` payload. The
//! decode functions share a contract: they receive the frame slice starting
//! at the `IAC` byte and return `Ok(None)` when the frame is not yet complete
//! (the scanner suspends and retries on the next read), `Ok(Some((consumed,
//! payload)))` on success, or a [`CodecError`](crate::CodecError) when the
//! bytes present already violate the sub-grammar.

pub mod environ;
pub mod naws;
pub mod ttype;
