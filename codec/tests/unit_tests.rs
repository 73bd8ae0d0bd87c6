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

//! Wire-level unit tests for the codec surface.

use bytes::{Bytes, BytesMut};
use teleterm_codec::{
    CodecError, OptionEvent, TelnetCodec, TelnetCommand, TelnetEvent, TelnetMessage, TelnetOption,
    WindowSize,
};
use tokio_util::codec::{Decoder, Encoder};
use tracing_test::traced_test;

// ============================================================================
// Helper Functions
// ============================================================================

fn decode_all(codec: &mut TelnetCodec, src: &mut BytesMut) -> Vec<TelnetEvent> {
    let mut events = Vec::new();
    while let Some(event) = codec.decode(src).expect("decode should not error") {
        events.push(event);
    }
    events
}

fn encode_message(message: TelnetMessage) -> BytesMut {
    let mut codec = TelnetCodec::new();
    let mut dst = BytesMut::new();
    codec.encode(message, &mut dst).expect("encode ok");
    dst
}

// ============================================================================
// Decoding - negotiation verbs over the registry
// ============================================================================

#[test]
fn decodes_every_negotiation_verb() {
    let verbs = [
        (0xFB, TelnetCommand::Will),
        (0xFC, TelnetCommand::Wont),
        (0xFD, TelnetCommand::Do),
        (0xFE, TelnetCommand::Dont),
    ];
    for (wire_verb, command) in verbs {
        let mut codec = TelnetCodec::new();
        let mut src = BytesMut::from(&[0xFF, wire_verb, 0x01][..]);
        let events = decode_all(&mut codec, &mut src);
        assert_eq!(events, vec![TelnetEvent::Option(OptionEvent::Echo(command))]);
    }
}

#[test]
fn decodes_acknowledgements_for_the_whole_registry() {
    let expectations: [(u8, fn(TelnetCommand) -> OptionEvent); 10] = [
        (0, OptionEvent::TransmitBinary),
        (1, OptionEvent::Echo),
        (3, OptionEvent::SuppressGoAhead),
        (5, OptionEvent::Status),
        (6, OptionEvent::TimingMark),
        (32, OptionEvent::TerminalSpeed),
        (33, OptionEvent::RemoteFlowControl),
        (34, OptionEvent::Linemode),
        (35, OptionEvent::XDisplayLocation),
        (37, OptionEvent::Authentication),
    ];
    for (code, build) in expectations {
        let mut codec = TelnetCodec::new();
        let mut src = BytesMut::from(&[0xFF, 0xFD, code][..]);
        let events = decode_all(&mut codec, &mut src);
        assert_eq!(
            events,
            vec![TelnetEvent::Option(build(TelnetCommand::Do))],
            "option code {code}"
        );
    }
}

#[test]
fn subneg_capable_options_have_empty_payload_on_plain_verbs() {
    let mut codec = TelnetCodec::new();
    let mut src = BytesMut::from(&[0xFF, 0xFB, 0x1F, 0xFF, 0xFB, 0x18, 0xFF, 0xFB, 0x27][..]);
    let events = decode_all(&mut codec, &mut src);
    assert_eq!(
        events,
        vec![
            TelnetEvent::Option(OptionEvent::WindowSize {
                command: TelnetCommand::Will,
                size: None,
            }),
            TelnetEvent::Option(OptionEvent::TerminalType {
                command: TelnetCommand::Will,
                name: None,
            }),
            TelnetEvent::Option(OptionEvent::Environment {
                command: TelnetCommand::Will,
                entry: None,
            }),
        ]
    );
}

#[test]
fn simple_commands_follow_the_three_byte_frame_rule() {
    // IAC NOP <opt> dispatches on the option byte like any other frame.
    let mut codec = TelnetCodec::new();
    let mut src = BytesMut::from(&[0xFF, 0xF1, 0x01][..]);
    let events = decode_all(&mut codec, &mut src);
    assert_eq!(
        events,
        vec![TelnetEvent::Option(OptionEvent::Echo(
            TelnetCommand::NoOperation
        ))]
    );
}

#[test]
fn data_mark_is_recognised_in_the_command_stream() {
    let mut codec = TelnetCodec::new();
    let mut src = BytesMut::from(&[0xFF, 0xF2, 0x00][..]);
    let events = decode_all(&mut codec, &mut src);
    assert_eq!(
        events,
        vec![TelnetEvent::Option(OptionEvent::TransmitBinary(
            TelnetCommand::DataMark
        ))]
    );
}

// ============================================================================
// Decoding - subnegotiations
// ============================================================================

#[test]
fn naws_resize_decodes_dimensions() {
    let mut codec = TelnetCodec::new();
    let mut src = BytesMut::from(&[0xFF, 0xFA, 0x1F, 0x02, 0x00, 0x01, 0x90, 0xFF, 0xF0][..]);
    let events = decode_all(&mut codec, &mut src);
    assert_eq!(
        events,
        vec![TelnetEvent::Option(OptionEvent::WindowSize {
            command: TelnetCommand::SubnegotiationBegin,
            size: Some(WindowSize::new(512, 400)),
        })]
    );
}

#[test]
fn naws_split_at_every_position_produces_the_same_event() {
    let frame = [0xFF, 0xFA, 0x1F, 0x00, 0x50, 0x00, 0x18, 0xFF, 0xF0];
    for split in 1..frame.len() {
        let mut codec = TelnetCodec::new();
        let mut src = BytesMut::from(&frame[..split]);
        assert!(
            decode_all(&mut codec, &mut src).is_empty(),
            "split at {split} should suspend"
        );
        src.extend_from_slice(&frame[split..]);
        let events = decode_all(&mut codec, &mut src);
        assert_eq!(
            events,
            vec![TelnetEvent::Option(OptionEvent::WindowSize {
                command: TelnetCommand::SubnegotiationBegin,
                size: Some(WindowSize::new(80, 24)),
            })],
            "split at {split}"
        );
    }
}

#[test]
fn terminal_type_answer_is_lowercased() {
    let mut codec = TelnetCodec::new();
    let mut src = BytesMut::from(
        &[
            0xFF, 0xFA, 0x18, 0x00, b'V', b'T', b'2', b'2', b'0', 0xFF, 0xF0,
        ][..],
    );
    let events = decode_all(&mut codec, &mut src);
    assert_eq!(
        events,
        vec![TelnetEvent::Option(OptionEvent::TerminalType {
            command: TelnetCommand::SubnegotiationBegin,
            name: Some("vt220".to_string()),
        })]
    );
}

#[test]
fn environment_update_decodes_name_value_and_kind() {
    let mut frame = vec![0xFF, 0xFA, 0x27, 0x02, 0x03];
    frame.extend_from_slice(b"SHELL");
    frame.push(0x01);
    frame.extend_from_slice(b"/bin/sh");
    frame.extend_from_slice(&[0xFF, 0xF0]);

    let mut codec = TelnetCodec::new();
    let mut src = BytesMut::from(&frame[..]);
    let events = decode_all(&mut codec, &mut src);
    match &events[..] {
        [TelnetEvent::Option(OptionEvent::Environment {
            command: TelnetCommand::SubnegotiationBegin,
            entry: Some(entry),
        })] => {
            assert_eq!(entry.name, "SHELL");
            assert_eq!(entry.value, "/bin/sh");
            assert_eq!(entry.kind.to_string(), "user");
        }
        other => panic!("unexpected events: {other:?}"),
    }
}

#[test]
fn malformed_environment_surfaces_an_error() {
    // Peer-sent SEND is not part of the inbound grammar.
    let mut codec = TelnetCodec::new();
    let mut src = BytesMut::from(
        &[0xFF, 0xFA, 0x27, 0x01, 0x00, b'T', 0x01, b'v', 0xFF, 0xF0][..],
    );
    let error = codec.decode(&mut src).unwrap_err();
    assert!(matches!(error, CodecError::MalformedSubnegotiation { .. }));
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn negotiation_messages_encode_three_bytes() {
    assert_eq!(
        &encode_message(TelnetMessage::Will(TelnetOption::SuppressGoAhead))[..],
        &[0xFF, 0xFB, 0x03]
    );
    assert_eq!(
        &encode_message(TelnetMessage::Dont(TelnetOption::Linemode))[..],
        &[0xFF, 0xFE, 0x22]
    );
}

#[test]
fn alias_constants_encode_the_same_bytes() {
    assert_eq!(
        encode_message(TelnetMessage::Do(TelnetOption::NAWS)),
        encode_message(TelnetMessage::Do(TelnetOption::WindowSize))
    );
    assert_eq!(
        encode_message(TelnetMessage::Do(TelnetOption::NEW_ENVIRON)),
        encode_message(TelnetMessage::Do(TelnetOption::EnvironmentVariables))
    );
}

#[test]
fn solicitation_messages_encode_their_subnegotiations() {
    assert_eq!(
        &encode_message(TelnetMessage::TerminalTypeRequest)[..],
        &[0xFF, 0xFA, 0x18, 0x01, 0xFF, 0xF0]
    );
    assert_eq!(
        &encode_message(TelnetMessage::EnvironmentRequest)[..],
        &[0xFF, 0xFA, 0x27, 0x01, 0xFF, 0xF0]
    );
}

#[traced_test]
#[test]
fn iac_before_a_non_command_byte_is_logged() {
    let mut codec = TelnetCodec::new();
    let mut src = BytesMut::from(&[0xFF, 0x20, b'x'][..]);
    let events = decode_all(&mut codec, &mut src);
    assert_eq!(events.len(), 2);
    assert!(logs_contain("IAC before non-command byte"));
}

#[test]
fn data_encoding_round_trips_through_the_decoder() {
    // Descending so the 0xFF byte is not the last one on the wire; a
    // trailing escape would park in the residue awaiting its frame window.
    let payload: Vec<u8> = (0u8..=255).rev().collect();
    let mut codec = TelnetCodec::new();
    let mut wire = BytesMut::new();
    codec
        .encode(TelnetMessage::Data(Bytes::from(payload.clone())), &mut wire)
        .unwrap();

    // 0xFF appears doubled on the wire.
    assert_eq!(wire.len(), payload.len() + 1);

    let mut received = Vec::new();
    while let Some(event) = codec.decode(&mut wire).unwrap() {
        match event {
            TelnetEvent::Data(span) => received.extend_from_slice(&span),
            TelnetEvent::Option(option) => panic!("unexpected option {option}"),
        }
    }
    assert_eq!(received, payload);
}
