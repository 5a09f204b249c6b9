pub fn execute() {
    println!(
        "\
SIMS PPOB - daftar perintah:
  register <email> <nama_depan> <nama_belakang> <password> <konfirmasi>
  login <email> <password>
  logout
  profile                         lihat profil
  profile edit <email> <nama_depan> <nama_belakang>
  profile image <path>            unggah foto profil (jpeg/png, maks 100KB)
  balance                         lihat saldo
  services                        daftar layanan pembayaran
  banner                          banner promo
  topup <nominal>                 top up saldo (Rp 10.000 - Rp 1.000.000)
  pay <kode_layanan>              bayar tagihan sesuai tarif layanan
  history                         muat ulang riwayat transaksi
  more                            muat 5 transaksi berikutnya
  quit"
    );
}
