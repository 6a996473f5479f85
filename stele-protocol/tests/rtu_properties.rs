//! Property tests for RTU framing and request handling

use proptest::prelude::*;
use stele_protocol::{Frame, FrameAssembler, FrameError, RegisterStore, Reply, Request, Slave};

struct Store {
    holding: Vec<u16>,
    input: Vec<u16>,
}

impl RegisterStore for Store {
    fn holding(&self) -> &[u16] {
        &self.holding
    }

    fn holding_mut(&mut self) -> &mut [u16] {
        &mut self.holding
    }

    fn input(&self) -> &[u16] {
        &self.input
    }
}

proptest! {
    #[test]
    fn corrupted_byte_is_rejected(
        address in any::<u8>(),
        pdu in prop::collection::vec(any::<u8>(), 1..=64),
        position in any::<prop::sample::Index>(),
        flip in 1..=255u8,
    ) {
        let frame = Frame::new(address, &pdu).unwrap();
        let mut encoded = frame.encode_to_vec().unwrap();
        let index = position.index(encoded.len());
        encoded[index] ^= flip;

        prop_assert_eq!(Frame::decode(&encoded), Err(FrameError::InvalidCrc));
    }

    #[test]
    fn assembled_frame_matches_sent_frame(
        address in any::<u8>(),
        pdu in prop::collection::vec(any::<u8>(), 1..=253),
    ) {
        let frame = Frame::new(address, &pdu).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        let mut assembler = FrameAssembler::new();
        assembler.extend(&encoded);
        let received = assembler.finish().unwrap().unwrap();

        prop_assert_eq!(received, frame);
    }

    #[test]
    fn request_parser_never_panics(pdu in prop::collection::vec(any::<u8>(), 0..=260)) {
        let _ = Request::parse(&pdu);
    }

    #[test]
    fn slave_answers_every_addressed_frame(pdu in prop::collection::vec(any::<u8>(), 1..=253)) {
        let slave = Slave::new(16);
        let mut store = Store { holding: vec![0; 120], input: vec![0; 10] };
        let frame = Frame::new(16, &pdu).unwrap();

        let reply = slave.handle(&frame, &mut store);
        prop_assert!(matches!(reply, Reply::Response(_) | Reply::Exception(_, _)));
    }

    #[test]
    fn write_then_read_returns_written_values(
        start in 0u16..100,
        values in prop::collection::vec(any::<u16>(), 1..=20),
    ) {
        let slave = Slave::new(16);
        let mut store = Store { holding: vec![0; 120], input: vec![0; 10] };
        let quantity = values.len() as u16;

        let mut write = vec![0x10];
        write.extend_from_slice(&start.to_be_bytes());
        write.extend_from_slice(&quantity.to_be_bytes());
        write.push((quantity * 2) as u8);
        for value in &values {
            write.extend_from_slice(&value.to_be_bytes());
        }
        let reply = slave.handle(&Frame::new(16, &write).unwrap(), &mut store);
        prop_assert!(matches!(reply, Reply::Response(_)));

        let mut read = vec![0x03];
        read.extend_from_slice(&start.to_be_bytes());
        read.extend_from_slice(&quantity.to_be_bytes());
        let reply = slave.handle(&Frame::new(16, &read).unwrap(), &mut store);
        let response = reply.frame().unwrap();

        prop_assert_eq!(response.pdu[1] as usize, values.len() * 2);
        for (i, value) in values.iter().enumerate() {
            let offset = 2 + i * 2;
            let read_back = u16::from_be_bytes([response.pdu[offset], response.pdu[offset + 1]]);
            prop_assert_eq!(read_back, *value);
        }
    }
}
