mod key_values;
mod node_directory;
mod timeline;

/// 两条发送、一条接收的完整语法 trace（故意不按时间排序）
pub(crate) const SAMPLE_TRACE: &str = "\
t 1.5 /NodeList/0/DeviceList/0/$ns3::AquaSimNetDevice/Phy/Tx ns3::AquaSimPacketStamp (Pt=0.2 Pr=0 Freq=25 Noise=0 TxRange(250)) ns3::AquaSimHeader (SAddr(0000) DAddr(0005) NextHop(0001) UId(7) Direction(DOWN) TxTime=+9.92e+07ns) ns3::MacHeader (SA=00:00 DA=00:01) ns3::VBHeader (MessType(0) PkNum(3) SenderAddr(0000) ForwardAddr(0000) TargetAddr(0005)) Payload (size=40)
r 1.7 /NodeList/1/DeviceList/0/$ns3::AquaSimNetDevice/Phy/Rx ns3::AquaSimHeader (SAddr(0000) DAddr(0005) NextHop(0001) UId(7) Direction(DOWN)) ns3::MacHeader (SA=00:00 DA=00:01) ns3::VBHeader (MessType(0) PkNum(3) SenderAddr(0000) ForwardAddr(0000) TargetAddr(0005)) Payload (size=40)
t 0.5 /NodeList/2/DeviceList/0/$ns3::AquaSimNetDevice/Phy/Tx ns3::AquaSimPacketStamp (Pt=0.3 Pr=0 Freq=26 Noise=0 TxRange(300)) ns3::AquaSimHeader (SAddr(0002) DAddr(0005) NextHop(0000) UId(8) Direction(DOWN)) ns3::MacHeader (SA=00:02 DA=00:00) ns3::VBHeader (MessType(0) PkNum(1) SenderAddr(0002) ForwardAddr(0002) TargetAddr(0005)) Payload (size=40)
";
